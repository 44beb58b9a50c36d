use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::{
    DomainError, DomainResult, Entity, Lifecycle, Quantified, Timestamped, define_entity_id,
    impl_lifecycle_text,
};

define_entity_id!(
    /// Picking order identifier.
    PickingOrderId
);

/// Picking order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickingStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl Lifecycle for PickingStatus {
    const ALL: &'static [Self] = &[
        PickingStatus::Pending,
        PickingStatus::InProgress,
        PickingStatus::Completed,
        PickingStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PickingStatus::Pending => "pending",
            PickingStatus::InProgress => "in_progress",
            PickingStatus::Completed => "completed",
            PickingStatus::Cancelled => "cancelled",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            PickingStatus::Pending => &[PickingStatus::InProgress, PickingStatus::Cancelled],
            PickingStatus::InProgress => &[PickingStatus::Completed, PickingStatus::Cancelled],
            PickingStatus::Completed | PickingStatus::Cancelled => &[],
        }
    }
}

impl_lifecycle_text!(PickingStatus);

/// Urgency of a picking order (ordered: `Low < Normal < High < Urgent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickingPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl PickingPriority {
    pub const ALL: [PickingPriority; 4] = [
        PickingPriority::Low,
        PickingPriority::Normal,
        PickingPriority::High,
        PickingPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickingPriority::Low => "low",
            PickingPriority::Normal => "normal",
            PickingPriority::High => "high",
            PickingPriority::Urgent => "urgent",
        }
    }
}

impl core::fmt::Display for PickingPriority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PickingPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown priority '{}'", s.trim())))
    }
}

/// Requested product on an order (location-agnostic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingOrderLine {
    pub line_no: u32,
    pub product_code: String,
    pub product_name: String,
    pub quantity: i64,
}

impl Quantified for PickingOrderLine {
    fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Picking order (flat mirror of the backend shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingOrder {
    pub id: PickingOrderId,
    pub order_no: String,
    pub customer: String,
    pub warehouse: String,
    pub priority: PickingPriority,
    pub status: PickingStatus,
    pub assignee: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub lines: Vec<PickingOrderLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for PickingOrder {
    type Id = PickingOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Timestamped for PickingOrder {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl PickingOrder {
    pub fn total_quantity(&self) -> i64 {
        wareflow_core::total_quantity(&self.lines)
    }

    /// Past its due time and not yet finished.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.due_at.is_some_and(|due| due < now)
    }

    pub fn is_deletable(&self) -> bool {
        self.status == PickingStatus::Pending
    }

    /// Move to `next`, enforcing the lifecycle table.
    ///
    /// Whether every item has been picked is checked separately against the
    /// process items (see [`crate::ensure_complete`]).
    pub fn transition(&mut self, next: PickingStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.status.check_transition(next)?;
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

/// Form input for a new order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPickingOrderLine {
    pub product_code: String,
    pub product_name: String,
    pub quantity: i64,
}

/// Form input for a new picking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPickingOrder {
    pub customer: String,
    pub warehouse: String,
    pub priority: PickingPriority,
    pub due_at: Option<DateTime<Utc>>,
    pub lines: Vec<NewPickingOrderLine>,
}

impl NewPickingOrder {
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer.trim().is_empty() {
            return Err(DomainError::validation("customer cannot be empty"));
        }
        if self.warehouse.trim().is_empty() {
            return Err(DomainError::validation("warehouse cannot be empty"));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("a picking order needs at least one line"));
        }
        for line in &self.lines {
            if line.product_code.trim().is_empty() {
                return Err(DomainError::validation("product code cannot be empty"));
            }
            if line.quantity <= 0 {
                return Err(DomainError::validation("quantity must be positive"));
            }
        }
        Ok(())
    }
}
