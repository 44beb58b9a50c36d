use chrono::Utc;

use wareflow_core::DomainError;
use wareflow_stock_out::{NewStockOut, StockOut, StockOutId, StockOutStatus};

use super::{DetailStore, ListStore};
use crate::usecase::{ListStockOuts, StockOutUseCases};

/// Outbound shipments.
pub struct StockOutStore {
    cases: StockOutUseCases,
    list: ListStore<ListStockOuts>,
    detail: DetailStore<StockOut>,
}

impl StockOutStore {
    pub fn new(cases: StockOutUseCases, page_size: u32) -> Self {
        Self {
            list: ListStore::new(cases.list.clone(), page_size),
            detail: DetailStore::new(),
            cases,
        }
    }

    pub fn list(&self) -> &ListStore<ListStockOuts> {
        &self.list
    }

    pub fn detail(&self) -> &DetailStore<StockOut> {
        &self.detail
    }

    pub async fn load(&self) -> Option<usize> {
        self.list.load().await
    }

    pub async fn select(&self, id: StockOutId) -> Option<StockOut> {
        let shipment = self.detail.run("stock_out.select", self.cases.get.execute(id)).await?;
        self.detail.set(shipment.clone());
        Some(shipment)
    }

    pub async fn create(&self, input: NewStockOut) -> Option<StockOut> {
        if let Err(err) = input.validate() {
            return self.detail.reject("stock_out.create", err);
        }
        let shipment = self
            .detail
            .run("stock_out.create", self.cases.create.execute(&input))
            .await?;
        tracing::info!(id = %shipment.id, reference_no = %shipment.reference_no, "stock-out created");
        self.list.prepend(shipment.clone());
        self.detail.set(shipment.clone());
        Some(shipment)
    }

    pub async fn change_status(&self, id: StockOutId, status: StockOutStatus) -> Option<StockOut> {
        let known = self
            .detail
            .current()
            .filter(|s| s.id == id)
            .or_else(|| self.list.find(|s| s.id == id));
        if let Some(mut known) = known {
            if let Err(err) = known.transition(status, Utc::now()) {
                return self.detail.reject("stock_out.change_status", err);
            }
        }
        let shipment = self
            .detail
            .run(
                "stock_out.change_status",
                self.cases.update_status.execute(id, status),
            )
            .await?;
        tracing::info!(id = %shipment.id, status = %shipment.status, "stock-out status changed");
        if self.detail.current().is_some_and(|s| s.id == id) {
            self.detail.set(shipment.clone());
        }
        self.list.replace_where(|s| s.id == id, shipment.clone());
        Some(shipment)
    }

    pub async fn delete(&self, id: StockOutId) -> Option<()> {
        let pending = self
            .detail
            .current()
            .filter(|s| s.id == id)
            .or_else(|| self.list.find(|s| s.id == id))
            .map(|s| s.is_deletable());
        if pending == Some(false) {
            return self.detail.reject(
                "stock_out.delete",
                DomainError::invariant("only pending shipments can be deleted"),
            );
        }
        self.detail
            .run("stock_out.delete", self.cases.delete.execute(id))
            .await?;
        tracing::info!(id = %id, "stock-out deleted");
        self.list.remove_where(|s| s.id == id);
        if self.detail.current().is_some_and(|s| s.id == id) {
            self.detail.clear();
        }
        Some(())
    }
}
