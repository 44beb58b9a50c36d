use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::DomainError;
use wareflow_inventory::{InventoryLine, InventoryRecord};

use super::non_negative;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLineDto {
    pub id: String,
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub location_code: String,
    pub expected_quantity: i64,
    #[serde(default)]
    pub counted_quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecordDto {
    pub id: String,
    pub code: String,
    pub warehouse: String,
    pub status: String,
    #[serde(default)]
    pub counted_by: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub lines: Vec<InventoryLineDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PATCH /api/inventory/{id}/lines/{line}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountUpdate {
    pub counted_quantity: i64,
}

impl TryFrom<InventoryLineDto> for InventoryLine {
    type Error = DomainError;

    fn try_from(dto: InventoryLineDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.parse()?,
            product_code: dto.product_code,
            product_name: dto.product_name,
            location_code: dto.location_code,
            expected_quantity: non_negative("expected_quantity", dto.expected_quantity)?,
            counted_quantity: dto
                .counted_quantity
                .map(|c| non_negative("counted_quantity", c))
                .transpose()?,
        })
    }
}

impl TryFrom<InventoryRecordDto> for InventoryRecord {
    type Error = DomainError;

    fn try_from(dto: InventoryRecordDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.parse()?,
            code: dto.code,
            warehouse: dto.warehouse,
            status: dto.status.parse()?,
            counted_by: dto.counted_by,
            note: dto.note,
            lines: dto
                .lines
                .into_iter()
                .map(InventoryLine::try_from)
                .collect::<Result<_, _>>()?,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

impl From<&InventoryLine> for InventoryLineDto {
    fn from(line: &InventoryLine) -> Self {
        Self {
            id: line.id.to_string(),
            product_code: line.product_code.clone(),
            product_name: line.product_name.clone(),
            location_code: line.location_code.clone(),
            expected_quantity: line.expected_quantity,
            counted_quantity: line.counted_quantity,
        }
    }
}

impl From<&InventoryRecord> for InventoryRecordDto {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            code: record.code.clone(),
            warehouse: record.warehouse.clone(),
            status: record.status.to_string(),
            counted_by: record.counted_by.clone(),
            note: record.note.clone(),
            lines: record.lines.iter().map(InventoryLineDto::from).collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
