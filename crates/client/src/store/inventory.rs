use chrono::Utc;

use wareflow_core::DomainError;
use wareflow_inventory::{
    InventoryLineId, InventoryRecord, InventoryRecordId, InventoryStatus, NewInventoryRecord,
};

use super::{DetailStore, ListStore};
use crate::usecase::{InventoryUseCases, ListInventory};

/// Inventory count screens: the paged list and the selected record.
pub struct InventoryStore {
    cases: InventoryUseCases,
    list: ListStore<ListInventory>,
    detail: DetailStore<InventoryRecord>,
}

impl InventoryStore {
    pub fn new(cases: InventoryUseCases, page_size: u32) -> Self {
        Self {
            list: ListStore::new(cases.list.clone(), page_size),
            detail: DetailStore::new(),
            cases,
        }
    }

    pub fn list(&self) -> &ListStore<ListInventory> {
        &self.list
    }

    pub fn detail(&self) -> &DetailStore<InventoryRecord> {
        &self.detail
    }

    pub async fn load(&self) -> Option<usize> {
        self.list.load().await
    }

    pub async fn select(&self, id: InventoryRecordId) -> Option<InventoryRecord> {
        let record = self.detail.run("inventory.select", self.cases.get.execute(id)).await?;
        self.detail.set(record.clone());
        Some(record)
    }

    pub async fn create(&self, input: NewInventoryRecord) -> Option<InventoryRecord> {
        if let Err(err) = input.validate() {
            return self.detail.reject("inventory.create", err);
        }
        let record = self
            .detail
            .run("inventory.create", self.cases.create.execute(&input))
            .await?;
        tracing::info!(id = %record.id, code = %record.code, "inventory record created");
        self.list.prepend(record.clone());
        self.detail.set(record.clone());
        Some(record)
    }

    pub async fn change_status(
        &self,
        id: InventoryRecordId,
        status: InventoryStatus,
    ) -> Option<InventoryRecord> {
        if let Some(mut known) = self.known(id) {
            if let Err(err) = known.transition(status, Utc::now()) {
                return self.detail.reject("inventory.change_status", err);
            }
        }
        let record = self
            .detail
            .run(
                "inventory.change_status",
                self.cases.update_status.execute(id, status),
            )
            .await?;
        tracing::info!(id = %record.id, status = %record.status, "inventory status changed");
        self.apply(record.clone());
        Some(record)
    }

    pub async fn record_count(
        &self,
        id: InventoryRecordId,
        line: InventoryLineId,
        counted: i64,
    ) -> Option<InventoryRecord> {
        if let Some(mut known) = self.known(id) {
            if let Err(err) = known.record_count(line, counted, Utc::now()) {
                return self.detail.reject("inventory.record_count", err);
            }
        }
        let record = self
            .detail
            .run(
                "inventory.record_count",
                self.cases.record_count.execute(id, line, counted),
            )
            .await?;
        tracing::info!(id = %record.id, line = %line, counted, "inventory count recorded");
        self.apply(record.clone());
        Some(record)
    }

    pub async fn delete(&self, id: InventoryRecordId) -> Option<()> {
        if self.known(id).is_some_and(|r| !r.is_deletable()) {
            return self.detail.reject(
                "inventory.delete",
                DomainError::invariant("only draft inventory records can be deleted"),
            );
        }
        self.detail
            .run("inventory.delete", self.cases.delete.execute(id))
            .await?;
        tracing::info!(id = %id, "inventory record deleted");
        self.list.remove_where(|r| r.id == id);
        if self.detail.current().is_some_and(|r| r.id == id) {
            self.detail.clear();
        }
        Some(())
    }

    fn known(&self, id: InventoryRecordId) -> Option<InventoryRecord> {
        self.detail
            .current()
            .filter(|r| r.id == id)
            .or_else(|| self.list.find(|r| r.id == id))
    }

    fn apply(&self, record: InventoryRecord) {
        if self.detail.current().is_some_and(|r| r.id == record.id) {
            self.detail.set(record.clone());
        }
        let id = record.id;
        self.list.replace_where(|r| r.id == id, record);
    }
}
