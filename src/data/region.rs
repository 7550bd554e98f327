use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Region groups – one-click selection presets
// ---------------------------------------------------------------------------

/// A named bundle of region codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGroup {
    pub display_name: &'static str,
    pub codes: &'static [&'static str],
}

/// Codes that every other group matches in addition to its own.
pub const GLOBAL: RegionGroup = RegionGroup {
    display_name: "Global",
    codes: &["GLOBAL", "CDN", "ANYCAST"],
};

pub const REGION_GROUPS: &[RegionGroup] = &[
    GLOBAL,
    RegionGroup {
        display_name: "China",
        codes: &["CN"],
    },
    RegionGroup {
        display_name: "Asia-Pacific",
        codes: &["CN", "HK", "TW", "MO", "JP", "KR", "SG", "IN", "TH", "VN", "MY", "ID", "PH"],
    },
    RegionGroup {
        display_name: "Europe",
        codes: &[
            "EU", "DE", "FR", "GB", "UK", "NL", "BE", "SE", "NO", "FI", "DK", "CH", "AT", "IT",
            "ES", "PT", "PL", "CZ", "IE", "RU",
        ],
    },
    RegionGroup {
        display_name: "North America",
        codes: &["US", "CA", "MX"],
    },
    RegionGroup {
        display_name: "Oceania",
        codes: &["AU", "NZ"],
    },
];

// ---------------------------------------------------------------------------
// Region catalog
// ---------------------------------------------------------------------------

/// The regions that can be selected: geocodes of valid records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: BTreeSet<String>,
}

impl RegionCatalog {
    /// Collect every non-blank geocode whose record has a positive total score.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let regions = dataset
            .iter()
            .filter(|e| e.record.is_valid())
            .map(|e| e.record.geocode.clone())
            .collect();
        RegionCatalog { regions }
    }

    pub fn regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Regions matched by a group preset.
    ///
    /// A region matches when its uppercase form contains any of the group's
    /// codes, or any [`GLOBAL`] code, as a substring. This is a loose
    /// heuristic: `"US-EAST"` matches `"US"`, and `"CN"` belongs to both the
    /// China and Asia-Pacific groups. A group without codes matches nothing
    /// and blank codes are skipped.
    pub fn match_group(&self, group: &RegionGroup) -> BTreeSet<String> {
        if group.codes.is_empty() {
            return BTreeSet::new();
        }
        let needles: Vec<String> = group
            .codes
            .iter()
            .chain(GLOBAL.codes)
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();

        self.regions
            .iter()
            .filter(|region| {
                let upper = region.to_uppercase();
                needles.iter().any(|n| upper.contains(n.as_str()))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{dataset, record};

    fn catalog(regions: &[&str]) -> RegionCatalog {
        RegionCatalog {
            regions: regions.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn catalog_skips_blank_geocodes_and_zero_scores() {
        let ds = dataset(&[
            ("a", record("US", 80.0, 20.0, 99.0, 10.0)),
            ("b", record("", 90.0, 20.0, 99.0, 10.0)),
            ("c", record("   ", 90.0, 20.0, 99.0, 10.0)),
            ("d", record("DE", 0.0, 20.0, 99.0, 10.0)),
            ("e", record("HK", 5.0, 0.0, 0.0, 0.0)),
            ("f", record("US", 7.0, 0.0, 0.0, 0.0)),
        ]);
        let cat = RegionCatalog::from_dataset(&ds);
        assert_eq!(cat.regions(), &set(&["HK", "US"]));
    }

    #[test]
    fn empty_dataset_yields_empty_catalog() {
        let cat = RegionCatalog::from_dataset(&Dataset::default());
        assert!(cat.regions().is_empty());
    }

    #[test]
    fn group_match_is_case_insensitive_substring() {
        let cat = catalog(&["US-EAST", "DE", "us-west"]);
        let group = RegionGroup {
            display_name: "US",
            codes: &["US"],
        };
        assert_eq!(cat.match_group(&group), set(&["US-EAST", "us-west"]));
    }

    #[test]
    fn global_codes_join_every_group() {
        let cat = catalog(&["CDN", "DE", "JP", "Global-Anycast"]);
        let europe = REGION_GROUPS
            .iter()
            .find(|g| g.display_name == "Europe")
            .unwrap();
        assert_eq!(cat.match_group(europe), set(&["CDN", "DE", "Global-Anycast"]));
    }

    #[test]
    fn overlapping_groups_share_regions() {
        let cat = catalog(&["CN", "HK", "SG"]);
        let china = &REGION_GROUPS[1];
        let asia = &REGION_GROUPS[2];
        assert_eq!(cat.match_group(china), set(&["CN"]));
        assert_eq!(cat.match_group(asia), set(&["CN", "HK", "SG"]));
    }

    #[test]
    fn group_without_codes_matches_nothing() {
        let cat = catalog(&["CDN", "US"]);
        let empty = RegionGroup {
            display_name: "Empty",
            codes: &[],
        };
        assert!(cat.match_group(&empty).is_empty());

        let blank = RegionGroup {
            display_name: "Blank",
            codes: &["", "  "],
        };
        assert_eq!(cat.match_group(&blank), set(&["CDN"]));
    }
}
