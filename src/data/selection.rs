use std::collections::BTreeSet;

use super::model::Dataset;
use super::region::{RegionCatalog, RegionGroup};

/// The set of selected region codes.
///
/// Values are never edited in place: each operation returns the next
/// selection and the caller swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    regions: BTreeSet<String>,
}

impl Selection {
    /// Every distinct non-blank geocode in the dataset, regardless of score.
    pub fn initial(dataset: &Dataset) -> Self {
        let regions = dataset
            .iter()
            .filter_map(|e| e.record.region())
            .map(str::to_string)
            .collect();
        Selection { regions }
    }

    /// Everything the catalog offers.
    pub fn all(catalog: &RegionCatalog) -> Self {
        Selection {
            regions: catalog.regions().clone(),
        }
    }

    /// Nothing selected.
    pub fn none() -> Self {
        Selection::default()
    }

    pub fn from_group(group: &RegionGroup, catalog: &RegionCatalog) -> Self {
        Selection {
            regions: catalog.match_group(group),
        }
    }

    /// Add (`included == true`) or remove one region.
    pub fn toggled(&self, region: &str, included: bool) -> Self {
        let mut regions = self.regions.clone();
        if included {
            regions.insert(region.to_string());
        } else {
            regions.remove(region);
        }
        Selection { regions }
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.contains(region)
    }

    pub fn regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{dataset, record};

    fn sample() -> Dataset {
        dataset(&[
            ("a", record("US", 80.0, 20.0, 99.0, 10.0)),
            ("b", record("", 90.0, 20.0, 99.0, 10.0)),
            ("c", record("DE", 0.0, 20.0, 99.0, 10.0)),
            ("d", record("US-EAST", 50.0, 20.0, 99.0, 10.0)),
        ])
    }

    #[test]
    fn initial_includes_zero_score_geocodes() {
        let sel = Selection::initial(&sample());
        let got: Vec<&str> = sel.regions().iter().map(String::as_str).collect();
        assert_eq!(got, ["DE", "US", "US-EAST"]);
    }

    #[test]
    fn initial_is_idempotent() {
        let ds = sample();
        assert_eq!(Selection::initial(&ds), Selection::initial(&ds));
    }

    #[test]
    fn blank_geocode_never_initialised() {
        let ds = dataset(&[("x", record("", 100.0, 1.0, 1.0, 1.0))]);
        assert!(Selection::initial(&ds).is_empty());
    }

    #[test]
    fn select_all_matches_catalog_and_none_is_empty() {
        let ds = sample();
        let cat = RegionCatalog::from_dataset(&ds);
        let all = Selection::all(&cat);
        assert_eq!(all.regions(), cat.regions());
        assert!(!all.contains("DE"));
        assert!(Selection::none().is_empty());
    }

    #[test]
    fn toggle_adds_and_removes() {
        let sel = Selection::none().toggled("HK", true);
        assert!(sel.contains("HK"));
        let sel = sel.toggled("HK", false);
        assert!(sel.is_empty());
        // removing an absent region is a no-op
        assert_eq!(sel.toggled("JP", false), sel);
    }

    #[test]
    fn toggle_returns_new_value() {
        let before = Selection::none().toggled("US", true);
        let after = before.toggled("DE", true);
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn group_replaces_selection() {
        let ds = dataset(&[
            ("a", record("US-EAST", 1.0, 0.0, 0.0, 0.0)),
            ("b", record("DE", 1.0, 0.0, 0.0, 0.0)),
            ("c", record("US-WEST", 1.0, 0.0, 0.0, 0.0)),
        ]);
        let cat = RegionCatalog::from_dataset(&ds);
        let group = RegionGroup {
            display_name: "US",
            codes: &["us"],
        };
        let sel = Selection::from_group(&group, &cat);
        let got: Vec<&str> = sel.regions().iter().map(String::as_str).collect();
        assert_eq!(got, ["US-EAST", "US-WEST"]);
    }
}
