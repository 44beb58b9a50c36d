use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::{
    DateRange, DomainError, DomainResult, Entity, Lifecycle, Quantified, Timestamped,
    define_entity_id, impl_lifecycle_text, matches_exact, matches_text,
};

define_entity_id!(
    /// Stock-out shipment identifier.
    StockOutId
);

define_entity_id!(
    /// Identifier of one line within a shipment.
    StockOutLineId
);

/// Shipment status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOutStatus {
    Pending,
    Picking,
    Shipped,
    Cancelled,
}

impl Lifecycle for StockOutStatus {
    const ALL: &'static [Self] = &[
        StockOutStatus::Pending,
        StockOutStatus::Picking,
        StockOutStatus::Shipped,
        StockOutStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            StockOutStatus::Pending => "pending",
            StockOutStatus::Picking => "picking",
            StockOutStatus::Shipped => "shipped",
            StockOutStatus::Cancelled => "cancelled",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            StockOutStatus::Pending => &[StockOutStatus::Picking, StockOutStatus::Cancelled],
            StockOutStatus::Picking => &[StockOutStatus::Shipped, StockOutStatus::Cancelled],
            StockOutStatus::Shipped | StockOutStatus::Cancelled => &[],
        }
    }
}

impl_lifecycle_text!(StockOutStatus);

/// Shipment line: product, source location and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOutLine {
    pub id: StockOutLineId,
    pub product_code: String,
    pub product_name: String,
    pub location_code: String,
    pub quantity: i64,
}

impl Quantified for StockOutLine {
    fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Outbound shipment (flat mirror of the backend shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOut {
    pub id: StockOutId,
    pub reference_no: String,
    pub destination: String,
    pub warehouse: String,
    pub status: StockOutStatus,
    pub note: Option<String>,
    pub lines: Vec<StockOutLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for StockOut {
    type Id = StockOutId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Timestamped for StockOut {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl StockOut {
    pub fn total_quantity(&self) -> i64 {
        wareflow_core::total_quantity(&self.lines)
    }

    pub fn is_deletable(&self) -> bool {
        self.status == StockOutStatus::Pending
    }

    pub fn transition(&mut self, next: StockOutStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.status.check_transition(next)?;
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockOutLine {
    pub product_code: String,
    pub product_name: String,
    pub location_code: String,
    pub quantity: i64,
}

/// Form input for a new shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockOut {
    pub destination: String,
    pub warehouse: String,
    pub note: Option<String>,
    pub lines: Vec<NewStockOutLine>,
}

impl NewStockOut {
    pub fn validate(&self) -> DomainResult<()> {
        if self.destination.trim().is_empty() {
            return Err(DomainError::validation("destination cannot be empty"));
        }
        if self.warehouse.trim().is_empty() {
            return Err(DomainError::validation("warehouse cannot be empty"));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("a shipment needs at least one line"));
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

/// List filters for shipments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOutFilter {
    pub status: Option<StockOutStatus>,
    pub warehouse: Option<String>,
    pub destination: Option<String>,
    pub search: Option<String>,
    pub created: DateRange,
}

impl StockOutFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, shipment: &StockOut) -> bool {
        self.status.is_none_or(|s| s == shipment.status)
            && matches_exact(&shipment.warehouse, self.warehouse.as_deref())
            && matches_text(&[shipment.destination.as_str()], self.destination.as_deref())
            && self.created.contains(shipment.created_at)
            && (matches_text(
                &[shipment.reference_no.as_str(), shipment.destination.as_str()],
                self.search.as_deref(),
            ) || shipment.lines.iter().any(|l| {
                matches_text(
                    &[l.product_code.as_str(), l.product_name.as_str()],
                    self.search.as_deref(),
                )
            }))
    }
}
