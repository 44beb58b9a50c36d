use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::DomainError;
use wareflow_stock_in::{StockIn, StockInLine};

use super::non_negative;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInLineDto {
    pub id: String,
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    pub expected_quantity: i64,
    #[serde(default)]
    pub received_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInDto {
    pub id: String,
    pub reference_no: String,
    pub supplier: String,
    pub warehouse: String,
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub lines: Vec<StockInLineDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PATCH /api/stock-in/{id}/lines/{line}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveUpdate {
    pub received_quantity: i64,
}

impl TryFrom<StockInLineDto> for StockInLine {
    type Error = DomainError;

    fn try_from(dto: StockInLineDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.parse()?,
            product_code: dto.product_code,
            product_name: dto.product_name,
            expected_quantity: non_negative("expected_quantity", dto.expected_quantity)?,
            received_quantity: non_negative("received_quantity", dto.received_quantity)?,
        })
    }
}

impl TryFrom<StockInDto> for StockIn {
    type Error = DomainError;

    fn try_from(dto: StockInDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.parse()?,
            reference_no: dto.reference_no,
            supplier: dto.supplier,
            warehouse: dto.warehouse,
            status: dto.status.parse()?,
            note: dto.note,
            lines: dto
                .lines
                .into_iter()
                .map(StockInLine::try_from)
                .collect::<Result<_, _>>()?,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

impl From<&StockInLine> for StockInLineDto {
    fn from(line: &StockInLine) -> Self {
        Self {
            id: line.id.to_string(),
            product_code: line.product_code.clone(),
            product_name: line.product_name.clone(),
            expected_quantity: line.expected_quantity,
            received_quantity: line.received_quantity,
        }
    }
}

impl From<&StockIn> for StockInDto {
    fn from(receipt: &StockIn) -> Self {
        Self {
            id: receipt.id.to_string(),
            reference_no: receipt.reference_no.clone(),
            supplier: receipt.supplier.clone(),
            warehouse: receipt.warehouse.clone(),
            status: receipt.status.to_string(),
            note: receipt.note.clone(),
            lines: receipt.lines.iter().map(StockInLineDto::from).collect(),
            created_at: receipt.created_at,
            updated_at: receipt.updated_at,
        }
    }
}
