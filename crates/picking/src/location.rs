//! Location grouping and pick progress.
//!
//! Process items are bucketed by their storage location key; each bucket
//! carries the summed requested/picked quantities. Groups come back in
//! walking order (warehouse, area, row, shelf, level, position).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use wareflow_core::{DomainError, DomainResult, StorageLocation, ratio};

use crate::process::PickingOrderProcessItem;

/// All process items that share one storage location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationGroup {
    pub key: String,
    pub location: StorageLocation,
    pub items: Vec<PickingOrderProcessItem>,
    pub requested: i64,
    pub picked: i64,
}

impl LocationGroup {
    fn new(location: StorageLocation) -> Self {
        Self {
            key: location.key(),
            location,
            items: Vec::new(),
            requested: 0,
            picked: 0,
        }
    }

    fn push(&mut self, item: PickingOrderProcessItem) {
        self.requested += item.requested_quantity;
        self.picked += item.picked_quantity;
        self.items.push(item);
    }

    pub fn progress(&self) -> f64 {
        ratio(self.picked, self.requested)
    }

    pub fn is_complete(&self) -> bool {
        self.items.iter().all(PickingOrderProcessItem::is_picked)
    }
}

/// Order-wide pick progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderProgress {
    pub requested: i64,
    pub picked: i64,
    /// `picked / requested`, 0.0 for an empty order.
    pub ratio: f64,
    pub items_total: usize,
    pub items_done: usize,
    pub locations_total: usize,
    pub locations_done: usize,
}

impl OrderProgress {
    pub fn is_complete(&self) -> bool {
        self.items_total > 0 && self.items_done == self.items_total
    }

    pub fn percent(&self) -> u8 {
        (self.ratio * 100.0).round() as u8
    }
}

/// Groups plus order-wide progress, as shown on the picking screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PickingSummary {
    pub groups: Vec<LocationGroup>,
    pub progress: OrderProgress,
}

/// Bucket items by location key, in walking order.
pub fn group_by_location(items: &[PickingOrderProcessItem]) -> Vec<LocationGroup> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut groups: Vec<LocationGroup> = Vec::new();

    for item in items {
        let key = item.location.key();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(LocationGroup::new(item.location.clone()));
            groups.len() - 1
        });
        groups[slot].push(item.clone());
    }

    groups.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.key.cmp(&b.key)));
    groups
}

/// Order-wide progress over a set of process items.
pub fn order_progress(items: &[PickingOrderProcessItem]) -> OrderProgress {
    progress_of(items, &group_by_location(items))
}

/// Group and measure in one pass over the items.
pub fn summarize(items: &[PickingOrderProcessItem]) -> PickingSummary {
    let groups = group_by_location(items);
    let progress = progress_of(items, &groups);
    PickingSummary { groups, progress }
}

/// Fails unless every item has been fully picked.
pub fn ensure_complete(items: &[PickingOrderProcessItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation("order has no items to pick"));
    }
    let open = items.iter().filter(|i| !i.is_picked()).count();
    if open > 0 {
        return Err(DomainError::validation(format!(
            "{open} of {} items are not fully picked",
            items.len()
        )));
    }
    Ok(())
}

fn progress_of(items: &[PickingOrderProcessItem], groups: &[LocationGroup]) -> OrderProgress {
    let requested: i64 = items.iter().map(|i| i.requested_quantity).sum();
    let picked: i64 = items.iter().map(|i| i.picked_quantity).sum();
    OrderProgress {
        requested,
        picked,
        ratio: ratio(picked, requested),
        items_total: items.len(),
        items_done: items.iter().filter(|i| i.is_picked()).count(),
        locations_total: groups.len(),
        locations_done: groups.iter().filter(|g| g.is_complete()).count(),
    }
}
