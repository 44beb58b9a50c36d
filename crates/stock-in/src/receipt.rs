use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::{
    DateRange, DomainError, DomainResult, Entity, Lifecycle, Quantified, Timestamped,
    define_entity_id, impl_lifecycle_text, matches_exact, matches_text, ratio,
};

define_entity_id!(
    /// Stock-in receipt identifier.
    StockInId
);

define_entity_id!(
    /// Identifier of one line within a receipt.
    StockInLineId
);

/// Receipt status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockInStatus {
    Pending,
    Receiving,
    Completed,
    Cancelled,
}

impl Lifecycle for StockInStatus {
    const ALL: &'static [Self] = &[
        StockInStatus::Pending,
        StockInStatus::Receiving,
        StockInStatus::Completed,
        StockInStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            StockInStatus::Pending => "pending",
            StockInStatus::Receiving => "receiving",
            StockInStatus::Completed => "completed",
            StockInStatus::Cancelled => "cancelled",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            StockInStatus::Pending => &[StockInStatus::Receiving, StockInStatus::Cancelled],
            StockInStatus::Receiving => &[StockInStatus::Completed, StockInStatus::Cancelled],
            StockInStatus::Completed | StockInStatus::Cancelled => &[],
        }
    }
}

impl_lifecycle_text!(StockInStatus);

/// Receipt line: what the supplier announced vs what arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInLine {
    pub id: StockInLineId,
    pub product_code: String,
    pub product_name: String,
    pub expected_quantity: i64,
    pub received_quantity: i64,
}

impl StockInLine {
    pub fn is_fully_received(&self) -> bool {
        self.received_quantity >= self.expected_quantity
    }

    pub fn outstanding(&self) -> i64 {
        (self.expected_quantity - self.received_quantity).max(0)
    }
}

impl Quantified for StockInLine {
    fn quantity(&self) -> i64 {
        self.expected_quantity
    }
}

/// Inbound receipt (flat mirror of the backend shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIn {
    pub id: StockInId,
    pub reference_no: String,
    pub supplier: String,
    pub warehouse: String,
    pub status: StockInStatus,
    pub note: Option<String>,
    pub lines: Vec<StockInLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for StockIn {
    type Id = StockInId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Timestamped for StockIn {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl StockIn {
    pub fn total_expected(&self) -> i64 {
        wareflow_core::total_quantity(&self.lines)
    }

    pub fn total_received(&self) -> i64 {
        self.lines.iter().map(|l| l.received_quantity).sum()
    }

    pub fn progress(&self) -> f64 {
        ratio(self.total_received(), self.total_expected())
    }

    pub fn is_deletable(&self) -> bool {
        self.status == StockInStatus::Pending
    }

    /// Set the received quantity of one line (absolute, bounded by expected).
    pub fn receive(
        &mut self,
        line_id: StockInLineId,
        received: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != StockInStatus::Receiving {
            return Err(DomainError::invariant(
                "goods can only be received while the receipt is receiving",
            ));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(DomainError::not_found)?;
        if received < 0 {
            return Err(DomainError::validation("received quantity cannot be negative"));
        }
        if received > line.expected_quantity {
            return Err(DomainError::validation(format!(
                "received quantity {received} exceeds expected {}",
                line.expected_quantity
            )));
        }
        line.received_quantity = received;
        self.updated_at = now;
        Ok(())
    }

    pub fn transition(&mut self, next: StockInStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.status.check_transition(next)?;
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockInLine {
    pub product_code: String,
    pub product_name: String,
    pub expected_quantity: i64,
}

/// Form input for a new receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockIn {
    pub supplier: String,
    pub warehouse: String,
    pub note: Option<String>,
    pub lines: Vec<NewStockInLine>,
}

impl NewStockIn {
    pub fn validate(&self) -> DomainResult<()> {
        if self.supplier.trim().is_empty() {
            return Err(DomainError::validation("supplier cannot be empty"));
        }
        if self.warehouse.trim().is_empty() {
            return Err(DomainError::validation("warehouse cannot be empty"));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("a receipt needs at least one line"));
        }
        for line in &self.lines {
            if line.product_code.trim().is_empty() {
                return Err(DomainError::validation("product code cannot be empty"));
            }
            if line.expected_quantity <= 0 {
                return Err(DomainError::validation("expected quantity must be positive"));
            }
        }
        Ok(())
    }
}

/// List filters for receipts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInFilter {
    pub status: Option<StockInStatus>,
    pub warehouse: Option<String>,
    pub supplier: Option<String>,
    pub search: Option<String>,
    pub created: DateRange,
}

impl StockInFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, receipt: &StockIn) -> bool {
        self.status.is_none_or(|s| s == receipt.status)
            && matches_exact(&receipt.warehouse, self.warehouse.as_deref())
            && matches_text(&[receipt.supplier.as_str()], self.supplier.as_deref())
            && self.created.contains(receipt.created_at)
            && (matches_text(
                &[receipt.reference_no.as_str(), receipt.supplier.as_str()],
                self.search.as_deref(),
            ) || receipt.lines.iter().any(|l| {
                matches_text(
                    &[l.product_code.as_str(), l.product_name.as_str()],
                    self.search.as_deref(),
                )
            }))
    }
}
