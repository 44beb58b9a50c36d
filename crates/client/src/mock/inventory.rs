use async_trait::async_trait;
use chrono::Utc;

use wareflow_core::{DomainError, Page, PageRequest};
use wareflow_inventory::{
    InventoryFilter, InventoryLine, InventoryLineId, InventoryRecord, InventoryRecordId,
    InventoryStatus, NewInventoryRecord,
};

use super::{MockTable, Sequence, fixtures, page_of};
use crate::error::{ClientError, ClientResult};
use crate::repository::InventoryRepository;

pub struct MockInventoryRepository {
    records: MockTable<InventoryRecordId, InventoryRecord>,
    sequence: Sequence,
}

impl Default for MockInventoryRepository {
    fn default() -> Self {
        Self::with_records(fixtures::inventory_records(fixtures::INVENTORY_FIXTURES))
    }
}

impl MockInventoryRepository {
    pub fn with_records(records: impl IntoIterator<Item = InventoryRecord>) -> Self {
        let records = MockTable::seeded(records.into_iter().map(|r| (r.id, r)));
        let sequence = Sequence::starting_after(records.len());
        Self { records, sequence }
    }
}

#[async_trait]
impl InventoryRepository for MockInventoryRepository {
    async fn list(&self, filter: &InventoryFilter, page: PageRequest) -> ClientResult<Page<InventoryRecord>> {
        Ok(page_of(self.records.list(), |r| filter.matches(r), page))
    }

    async fn get(&self, id: InventoryRecordId) -> ClientResult<InventoryRecord> {
        self.records.get(&id).ok_or(ClientError::NotFound)
    }

    async fn create(&self, input: &NewInventoryRecord) -> ClientResult<InventoryRecord> {
        input.validate()?;
        let now = Utc::now();
        let record = InventoryRecord {
            id: InventoryRecordId::generate(),
            code: format!("INV-{:06}", self.sequence.next()),
            warehouse: input.warehouse.trim().to_string(),
            status: InventoryStatus::Draft,
            counted_by: None,
            note: input.note.clone(),
            lines: input
                .lines
                .iter()
                .map(|l| InventoryLine {
                    id: InventoryLineId::generate(),
                    product_code: l.product_code.trim().to_string(),
                    product_name: l.product_name.clone(),
                    location_code: l.location_code.trim().to_string(),
                    expected_quantity: l.expected_quantity,
                    counted_quantity: None,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        self.records.upsert(record.id, record.clone());
        Ok(record)
    }

    async fn update_status(&self, id: InventoryRecordId, status: InventoryStatus) -> ClientResult<InventoryRecord> {
        let (record, ()) = self.records.update(&id, |r| Ok(r.transition(status, Utc::now())?))?;
        Ok(record)
    }

    async fn record_count(
        &self,
        id: InventoryRecordId,
        line: InventoryLineId,
        counted: i64,
    ) -> ClientResult<InventoryRecord> {
        let (record, ()) = self
            .records
            .update(&id, |r| Ok(r.record_count(line, counted, Utc::now())?))?;
        Ok(record)
    }

    async fn delete(&self, id: InventoryRecordId) -> ClientResult<()> {
        let record = self.records.get(&id).ok_or(ClientError::NotFound)?;
        if !record.is_deletable() {
            return Err(DomainError::invariant("only draft inventory counts can be deleted").into());
        }
        self.records.remove(&id);
        Ok(())
    }
}
