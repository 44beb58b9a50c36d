use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::{
    DomainError, DomainResult, Entity, Lifecycle, Quantified, Timestamped, define_entity_id,
    impl_lifecycle_text, ratio,
};

define_entity_id!(
    /// Inventory count identifier.
    InventoryRecordId
);

define_entity_id!(
    /// Identifier of one line within an inventory count.
    InventoryLineId
);

/// Inventory count status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    Draft,
    InProgress,
    Completed,
    Cancelled,
}

impl Lifecycle for InventoryStatus {
    const ALL: &'static [Self] = &[
        InventoryStatus::Draft,
        InventoryStatus::InProgress,
        InventoryStatus::Completed,
        InventoryStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::Draft => "draft",
            InventoryStatus::InProgress => "in_progress",
            InventoryStatus::Completed => "completed",
            InventoryStatus::Cancelled => "cancelled",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            InventoryStatus::Draft => &[InventoryStatus::InProgress, InventoryStatus::Cancelled],
            InventoryStatus::InProgress => {
                &[InventoryStatus::Completed, InventoryStatus::Cancelled]
            }
            InventoryStatus::Completed | InventoryStatus::Cancelled => &[],
        }
    }
}

impl_lifecycle_text!(InventoryStatus);

/// One product at one location: expected vs counted quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub id: InventoryLineId,
    pub product_code: String,
    pub product_name: String,
    pub location_code: String,
    pub expected_quantity: i64,
    /// `None` until an operator has counted the line.
    pub counted_quantity: Option<i64>,
}

impl InventoryLine {
    pub fn is_counted(&self) -> bool {
        self.counted_quantity.is_some()
    }

    /// Counted minus expected; `None` until counted.
    pub fn variance(&self) -> Option<i64> {
        self.counted_quantity.map(|c| c - self.expected_quantity)
    }
}

impl Quantified for InventoryLine {
    fn quantity(&self) -> i64 {
        self.expected_quantity
    }
}

/// Inventory count record (flat mirror of the backend shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: InventoryRecordId,
    /// Human-facing code, e.g. `INV-000042`.
    pub code: String,
    pub warehouse: String,
    pub status: InventoryStatus,
    pub counted_by: Option<String>,
    pub note: Option<String>,
    pub lines: Vec<InventoryLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for InventoryRecord {
    type Id = InventoryRecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Timestamped for InventoryRecord {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl InventoryRecord {
    pub fn total_expected(&self) -> i64 {
        wareflow_core::total_quantity(&self.lines)
    }

    pub fn total_counted(&self) -> i64 {
        self.lines.iter().filter_map(|l| l.counted_quantity).sum()
    }

    pub fn counted_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.is_counted()).count()
    }

    /// Share of lines counted so far.
    pub fn progress(&self) -> f64 {
        ratio(self.counted_lines() as i64, self.lines.len() as i64)
    }

    /// Counted lines whose count differs from the expected quantity.
    pub fn discrepancies(&self) -> impl Iterator<Item = &InventoryLine> {
        self.lines
            .iter()
            .filter(|l| l.variance().is_some_and(|v| v != 0))
    }

    pub fn line(&self, line_id: InventoryLineId) -> Option<&InventoryLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn is_deletable(&self) -> bool {
        self.status == InventoryStatus::Draft
    }

    /// Record the counted quantity of one line.
    pub fn record_count(
        &mut self,
        line_id: InventoryLineId,
        counted: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != InventoryStatus::InProgress {
            return Err(DomainError::invariant(
                "counts can only be recorded while the inventory is in progress",
            ));
        }
        if counted < 0 {
            return Err(DomainError::validation("counted quantity cannot be negative"));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(DomainError::not_found)?;
        line.counted_quantity = Some(counted);
        self.updated_at = now;
        Ok(())
    }

    /// Move to `next`, enforcing the lifecycle table. Completion requires
    /// every line to be counted.
    pub fn transition(&mut self, next: InventoryStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.status.check_transition(next)?;
        if next == InventoryStatus::Completed && self.counted_lines() < self.lines.len() {
            return Err(DomainError::validation(format!(
                "{} of {} lines are still uncounted",
                self.lines.len() - self.counted_lines(),
                self.lines.len()
            )));
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

/// Form input for a new line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryLine {
    pub product_code: String,
    pub product_name: String,
    pub location_code: String,
    pub expected_quantity: i64,
}

/// Form input for a new inventory count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryRecord {
    pub warehouse: String,
    pub note: Option<String>,
    pub lines: Vec<NewInventoryLine>,
}

impl NewInventoryRecord {
    pub fn validate(&self) -> DomainResult<()> {
        if self.warehouse.trim().is_empty() {
            return Err(DomainError::validation("warehouse cannot be empty"));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("an inventory count needs at least one line"));
        }

        let mut seen = HashSet::new();
        for line in &self.lines {
            if line.product_code.trim().is_empty() {
                return Err(DomainError::validation("product code cannot be empty"));
            }
            if line.expected_quantity < 0 {
                return Err(DomainError::validation("expected quantity cannot be negative"));
            }
            let key = (line.product_code.trim(), line.location_code.trim());
            if !seen.insert(key) {
                return Err(DomainError::validation(format!(
                    "duplicate line for product {} at {}",
                    key.0, key.1
                )));
            }
        }
        Ok(())
    }
}
