use async_trait::async_trait;
use chrono::Utc;

use wareflow_core::{DomainError, Page, PageRequest};
use wareflow_stock_in::{
    NewStockIn, StockIn, StockInFilter, StockInId, StockInLine, StockInLineId, StockInStatus,
};

use super::{MockTable, Sequence, fixtures, page_of};
use crate::error::{ClientError, ClientResult};
use crate::repository::StockInRepository;

pub struct MockStockInRepository {
    receipts: MockTable<StockInId, StockIn>,
    sequence: Sequence,
}

impl Default for MockStockInRepository {
    fn default() -> Self {
        Self::with_receipts(fixtures::stock_ins(fixtures::STOCK_IN_FIXTURES))
    }
}

impl MockStockInRepository {
    pub fn with_receipts(receipts: impl IntoIterator<Item = StockIn>) -> Self {
        let receipts = MockTable::seeded(receipts.into_iter().map(|r| (r.id, r)));
        let sequence = Sequence::starting_after(receipts.len());
        Self { receipts, sequence }
    }
}

#[async_trait]
impl StockInRepository for MockStockInRepository {
    async fn list(&self, filter: &StockInFilter, page: PageRequest) -> ClientResult<Page<StockIn>> {
        Ok(page_of(self.receipts.list(), |r| filter.matches(r), page))
    }

    async fn get(&self, id: StockInId) -> ClientResult<StockIn> {
        self.receipts.get(&id).ok_or(ClientError::NotFound)
    }

    async fn create(&self, input: &NewStockIn) -> ClientResult<StockIn> {
        input.validate()?;
        let now = Utc::now();
        let receipt = StockIn {
            id: StockInId::generate(),
            reference_no: format!("GRN-{:06}", self.sequence.next()),
            supplier: input.supplier.trim().to_string(),
            warehouse: input.warehouse.trim().to_string(),
            status: StockInStatus::Pending,
            note: input.note.clone(),
            lines: input
                .lines
                .iter()
                .map(|l| StockInLine {
                    id: StockInLineId::generate(),
                    product_code: l.product_code.trim().to_string(),
                    product_name: l.product_name.clone(),
                    expected_quantity: l.expected_quantity,
                    received_quantity: 0,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        self.receipts.upsert(receipt.id, receipt.clone());
        Ok(receipt)
    }

    async fn update_status(&self, id: StockInId, status: StockInStatus) -> ClientResult<StockIn> {
        let (receipt, ()) = self.receipts.update(&id, |r| Ok(r.transition(status, Utc::now())?))?;
        Ok(receipt)
    }

    async fn receive_line(&self, id: StockInId, line: StockInLineId, received: i64) -> ClientResult<StockIn> {
        let (receipt, ()) = self
            .receipts
            .update(&id, |r| Ok(r.receive(line, received, Utc::now())?))?;
        Ok(receipt)
    }

    async fn delete(&self, id: StockInId) -> ClientResult<()> {
        let receipt = self.receipts.get(&id).ok_or(ClientError::NotFound)?;
        if !receipt.is_deletable() {
            return Err(DomainError::invariant("only pending receipts can be deleted").into());
        }
        self.receipts.remove(&id);
        Ok(())
    }
}
