use serde::{Deserialize, Serialize};

use wareflow_core::{DateRange, matches_exact, matches_text};

use crate::order::{PickingOrder, PickingPriority, PickingStatus};

/// List filters for picking orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingFilter {
    pub status: Option<PickingStatus>,
    pub priority: Option<PickingPriority>,
    pub warehouse: Option<String>,
    pub assignee: Option<String>,
    /// Free text over order number, customer and product codes/names.
    pub search: Option<String>,
    pub created: DateRange,
}

impl PickingFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, order: &PickingOrder) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != order.priority) {
            return false;
        }
        if !matches_exact(&order.warehouse, self.warehouse.as_deref()) {
            return false;
        }
        if self.assignee.is_some()
            && !matches_exact(
                order.assignee.as_deref().unwrap_or_default(),
                self.assignee.as_deref(),
            )
        {
            return false;
        }
        if !self.created.contains(order.created_at) {
            return false;
        }

        let search = self.search.as_deref();
        matches_text(&[order.order_no.as_str(), order.customer.as_str()], search)
            || order.lines.iter().any(|l| {
                matches_text(&[l.product_code.as_str(), l.product_name.as_str()], search)
            })
    }
}
