use super::model::{Dataset, ServerEntry};
use super::selection::Selection;

// ---------------------------------------------------------------------------
// Filter predicate: selected region and positive score
// ---------------------------------------------------------------------------

fn passes(entry: &ServerEntry, selection: &Selection) -> bool {
    entry
        .record
        .region()
        .is_some_and(|region| selection.contains(region))
        && entry.record.score.total > 0.0
}

/// Return indices of servers whose region is selected and whose total score
/// is positive, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &Selection) -> Vec<usize> {
    if selection.is_empty() {
        return Vec::new();
    }
    dataset
        .iter()
        .enumerate()
        .filter(|(_, e)| passes(e, selection))
        .map(|(i, _)| i)
        .collect()
}

/// Resolve indices from [`filtered_indices`] to their entries, keeping order.
pub fn entries_at<'a>(dataset: &'a Dataset, indices: &[usize]) -> Vec<&'a ServerEntry> {
    indices.iter().filter_map(|&i| dataset.entry(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{dataset, record};

    fn filter_servers<'a>(dataset: &'a Dataset, selection: &Selection) -> Vec<&'a ServerEntry> {
        entries_at(dataset, &filtered_indices(dataset, selection))
    }

    fn selection(regions: &[&str]) -> Selection {
        regions
            .iter()
            .fold(Selection::none(), |sel, r| sel.toggled(r, true))
    }

    #[test]
    fn keeps_only_selected_and_scored() {
        let ds = dataset(&[
            ("a", record("US", 80.0, 20.0, 99.0, 1.0)),
            ("b", record("US", 0.0, 20.0, 99.0, 1.0)),
            ("c", record("DE", 70.0, 20.0, 99.0, 1.0)),
            ("d", record("JP", 60.0, 20.0, 99.0, 1.0)),
        ]);
        let sel = selection(&["US", "JP"]);
        let ids: Vec<&str> = filter_servers(&ds, &sel)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "d"]);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 3]);
    }

    #[test]
    fn membership_is_exactly_the_conjunction() {
        let ds = dataset(&[
            ("a", record("US", 80.0, 0.0, 0.0, 0.0)),
            ("b", record("US", 0.0, 0.0, 0.0, 0.0)),
            ("c", record("DE", 70.0, 0.0, 0.0, 0.0)),
            ("d", record("DE", 0.0, 0.0, 0.0, 0.0)),
            ("e", record("", 70.0, 0.0, 0.0, 0.0)),
        ]);
        let sel = selection(&["US", ""]);
        let kept = filter_servers(&ds, &sel);
        for entry in ds.iter() {
            let expected = sel.contains(&entry.record.geocode)
                && !entry.record.geocode.is_empty()
                && entry.record.score.total > 0.0;
            let present = kept.iter().any(|k| k.id == entry.id);
            assert_eq!(present, expected, "server {}", entry.id);
        }
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        let ds = dataset(&[("a", record("US", 80.0, 0.0, 0.0, 0.0))]);
        assert!(filter_servers(&ds, &Selection::none()).is_empty());
        assert!(filtered_indices(&ds, &Selection::none()).is_empty());
        assert!(filter_servers(&Dataset::default(), &selection(&["US"])).is_empty());
    }

    #[test]
    fn preserves_dataset_order() {
        let ds = dataset(&[
            ("zeta", record("US", 1.0, 0.0, 0.0, 0.0)),
            ("alpha", record("US", 2.0, 0.0, 0.0, 0.0)),
            ("mid", record("US", 3.0, 0.0, 0.0, 0.0)),
        ]);
        let ids: Vec<&str> = filter_servers(&ds, &selection(&["US"]))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
    }
}
