use serde::{Deserialize, Serialize};

use wareflow_core::{DomainError, DomainResult, Entity, Quantified, StorageLocation, define_entity_id};

use crate::order::PickingOrderId;

define_entity_id!(
    /// Identifier of one process item of a picking order.
    PickItemId
);

/// Pick state of a single process item, derived from its quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickItemStatus {
    Pending,
    Partial,
    Picked,
}

/// A product to pick at a specific storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingOrderProcessItem {
    pub id: PickItemId,
    pub order_id: PickingOrderId,
    pub product_code: String,
    pub product_name: String,
    pub location: StorageLocation,
    pub requested_quantity: i64,
    pub picked_quantity: i64,
}

impl Entity for PickingOrderProcessItem {
    type Id = PickItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Quantified for PickingOrderProcessItem {
    fn quantity(&self) -> i64 {
        self.requested_quantity
    }
}

impl PickingOrderProcessItem {
    pub fn remaining(&self) -> i64 {
        (self.requested_quantity - self.picked_quantity).max(0)
    }

    pub fn is_picked(&self) -> bool {
        self.picked_quantity >= self.requested_quantity
    }

    pub fn status(&self) -> PickItemStatus {
        if self.is_picked() {
            PickItemStatus::Picked
        } else if self.picked_quantity > 0 {
            PickItemStatus::Partial
        } else {
            PickItemStatus::Pending
        }
    }

    /// Set the picked quantity (absolute, not a delta).
    pub fn record_pick(&mut self, picked: i64) -> DomainResult<()> {
        if picked < 0 {
            return Err(DomainError::validation("picked quantity cannot be negative"));
        }
        if picked > self.requested_quantity {
            return Err(DomainError::validation(format!(
                "picked quantity {picked} exceeds requested {}",
                self.requested_quantity
            )));
        }
        self.picked_quantity = picked;
        Ok(())
    }
}
