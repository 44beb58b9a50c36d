use serde::{Deserialize, Serialize};

use wareflow_core::{DateRange, matches_exact, matches_text};

use crate::record::{InventoryRecord, InventoryStatus};

/// List filters for inventory counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub status: Option<InventoryStatus>,
    pub warehouse: Option<String>,
    /// Free text over code, note, counter and product codes/names.
    pub search: Option<String>,
    pub created: DateRange,
}

impl InventoryFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &InventoryRecord) -> bool {
        if self.status.is_some_and(|s| s != record.status) {
            return false;
        }
        if !matches_exact(&record.warehouse, self.warehouse.as_deref()) {
            return false;
        }
        if !self.created.contains(record.created_at) {
            return false;
        }

        let search = self.search.as_deref();
        matches_text(
            &[
                record.code.as_str(),
                record.note.as_deref().unwrap_or_default(),
                record.counted_by.as_deref().unwrap_or_default(),
            ],
            search,
        ) || record.lines.iter().any(|l| {
            matches_text(&[l.product_code.as_str(), l.product_name.as_str()], search)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{InventoryLine, InventoryLineId, InventoryRecordId};
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn record(code: &str, warehouse: &str, status: InventoryStatus) -> InventoryRecord {
        let at = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        InventoryRecord {
            id: InventoryRecordId::generate(),
            code: code.into(),
            warehouse: warehouse.into(),
            status,
            counted_by: Some("alice".into()),
            note: None,
            lines: vec![InventoryLine {
                id: InventoryLineId::generate(),
                product_code: "SKU-RED".into(),
                product_name: "Red bolt".into(),
                location_code: "A-01".into(),
                expected_quantity: 3,
                counted_quantity: None,
            }],
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        let f = InventoryFilter::default();
        assert!(f.is_empty());
        assert!(f.matches(&record("INV-1", "WH1", InventoryStatus::Draft)));
    }

    #[test]
    fn status_and_warehouse_narrow_results() {
        let rec = record("INV-1", "WH1", InventoryStatus::InProgress);
        let f = InventoryFilter {
            status: Some(InventoryStatus::InProgress),
            warehouse: Some("wh1".into()),
            ..Default::default()
        };
        assert!(f.matches(&rec));

        let f = InventoryFilter {
            status: Some(InventoryStatus::Draft),
            ..Default::default()
        };
        assert!(!f.matches(&rec));

        let f = InventoryFilter {
            warehouse: Some("WH2".into()),
            ..Default::default()
        };
        assert!(!f.matches(&rec));
    }

    #[test]
    fn search_covers_header_and_lines() {
        let rec = record("INV-77", "WH1", InventoryStatus::Draft);
        for needle in ["inv-77", "ALICE", "red bolt", "sku-red"] {
            let f = InventoryFilter {
                search: Some(needle.into()),
                ..Default::default()
            };
            assert!(f.matches(&rec), "expected {needle} to match");
        }
        let f = InventoryFilter {
            search: Some("blue".into()),
            ..Default::default()
        };
        assert!(!f.matches(&rec));
    }

    #[test]
    fn created_range_is_applied() {
        let rec = record("INV-1", "WH1", InventoryStatus::Draft);
        let f = InventoryFilter {
            created: DateRange::new(NaiveDate::from_ymd_opt(2024, 6, 1), None),
            ..Default::default()
        };
        assert!(!f.matches(&rec));
    }

    proptest! {
        #[test]
        fn blank_search_never_excludes(spaces in " {0,8}", code in "[A-Z]{3}-[0-9]{1,6}") {
            let rec = record(&code, "WH1", InventoryStatus::Draft);
            let f = InventoryFilter { search: Some(spaces), ..Default::default() };
            prop_assert!(f.matches(&rec));
        }
    }
}
