use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::DomainError;
use wareflow_stock_out::{StockOut, StockOutLine};

use super::non_negative;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOutLineDto {
    pub id: String,
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub location_code: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOutDto {
    pub id: String,
    pub reference_no: String,
    pub destination: String,
    pub warehouse: String,
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub lines: Vec<StockOutLineDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StockOutLineDto> for StockOutLine {
    type Error = DomainError;

    fn try_from(dto: StockOutLineDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.parse()?,
            product_code: dto.product_code,
            product_name: dto.product_name,
            location_code: dto.location_code,
            quantity: non_negative("quantity", dto.quantity)?,
        })
    }
}

impl TryFrom<StockOutDto> for StockOut {
    type Error = DomainError;

    fn try_from(dto: StockOutDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.parse()?,
            reference_no: dto.reference_no,
            destination: dto.destination,
            warehouse: dto.warehouse,
            status: dto.status.parse()?,
            note: dto.note,
            lines: dto
                .lines
                .into_iter()
                .map(StockOutLine::try_from)
                .collect::<Result<_, _>>()?,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

impl From<&StockOutLine> for StockOutLineDto {
    fn from(line: &StockOutLine) -> Self {
        Self {
            id: line.id.to_string(),
            product_code: line.product_code.clone(),
            product_name: line.product_name.clone(),
            location_code: line.location_code.clone(),
            quantity: line.quantity,
        }
    }
}

impl From<&StockOut> for StockOutDto {
    fn from(shipment: &StockOut) -> Self {
        Self {
            id: shipment.id.to_string(),
            reference_no: shipment.reference_no.clone(),
            destination: shipment.destination.clone(),
            warehouse: shipment.warehouse.clone(),
            status: shipment.status.to_string(),
            note: shipment.note.clone(),
            lines: shipment.lines.iter().map(StockOutLineDto::from).collect(),
            created_at: shipment.created_at,
            updated_at: shipment.updated_at,
        }
    }
}
