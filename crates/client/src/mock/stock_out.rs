use async_trait::async_trait;
use chrono::Utc;

use wareflow_core::{DomainError, Page, PageRequest};
use wareflow_stock_out::{
    NewStockOut, StockOut, StockOutFilter, StockOutId, StockOutLine, StockOutLineId, StockOutStatus,
};

use super::{MockTable, Sequence, fixtures, page_of};
use crate::error::{ClientError, ClientResult};
use crate::repository::StockOutRepository;

pub struct MockStockOutRepository {
    shipments: MockTable<StockOutId, StockOut>,
    sequence: Sequence,
}

impl Default for MockStockOutRepository {
    fn default() -> Self {
        Self::with_shipments(fixtures::stock_outs(fixtures::STOCK_OUT_FIXTURES))
    }
}

impl MockStockOutRepository {
    pub fn with_shipments(shipments: impl IntoIterator<Item = StockOut>) -> Self {
        let shipments = MockTable::seeded(shipments.into_iter().map(|s| (s.id, s)));
        let sequence = Sequence::starting_after(shipments.len());
        Self { shipments, sequence }
    }
}

#[async_trait]
impl StockOutRepository for MockStockOutRepository {
    async fn list(&self, filter: &StockOutFilter, page: PageRequest) -> ClientResult<Page<StockOut>> {
        Ok(page_of(self.shipments.list(), |s| filter.matches(s), page))
    }

    async fn get(&self, id: StockOutId) -> ClientResult<StockOut> {
        self.shipments.get(&id).ok_or(ClientError::NotFound)
    }

    async fn create(&self, input: &NewStockOut) -> ClientResult<StockOut> {
        input.validate()?;
        let now = Utc::now();
        let shipment = StockOut {
            id: StockOutId::generate(),
            reference_no: format!("DN-{:06}", self.sequence.next()),
            destination: input.destination.trim().to_string(),
            warehouse: input.warehouse.trim().to_string(),
            status: StockOutStatus::Pending,
            note: input.note.clone(),
            lines: input
                .lines
                .iter()
                .map(|l| StockOutLine {
                    id: StockOutLineId::generate(),
                    product_code: l.product_code.trim().to_string(),
                    product_name: l.product_name.clone(),
                    location_code: l.location_code.trim().to_string(),
                    quantity: l.quantity,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        self.shipments.upsert(shipment.id, shipment.clone());
        Ok(shipment)
    }

    async fn update_status(&self, id: StockOutId, status: StockOutStatus) -> ClientResult<StockOut> {
        let (shipment, ()) = self.shipments.update(&id, |s| Ok(s.transition(status, Utc::now())?))?;
        Ok(shipment)
    }

    async fn delete(&self, id: StockOutId) -> ClientResult<()> {
        let shipment = self.shipments.get(&id).ok_or(ClientError::NotFound)?;
        if !shipment.is_deletable() {
            return Err(DomainError::invariant("only pending shipments can be deleted").into());
        }
        self.shipments.remove(&id);
        Ok(())
    }
}
