use chrono::Utc;

use wareflow_core::DomainError;
use wareflow_stock_in::{NewStockIn, StockIn, StockInId, StockInLineId, StockInStatus};

use super::{DetailStore, ListStore};
use crate::usecase::{ListStockIns, StockInUseCases};

/// Inbound receipts.
pub struct StockInStore {
    cases: StockInUseCases,
    list: ListStore<ListStockIns>,
    detail: DetailStore<StockIn>,
}

impl StockInStore {
    pub fn new(cases: StockInUseCases, page_size: u32) -> Self {
        Self {
            list: ListStore::new(cases.list.clone(), page_size),
            detail: DetailStore::new(),
            cases,
        }
    }

    pub fn list(&self) -> &ListStore<ListStockIns> {
        &self.list
    }

    pub fn detail(&self) -> &DetailStore<StockIn> {
        &self.detail
    }

    pub async fn load(&self) -> Option<usize> {
        self.list.load().await
    }

    pub async fn select(&self, id: StockInId) -> Option<StockIn> {
        let receipt = self.detail.run("stock_in.select", self.cases.get.execute(id)).await?;
        self.detail.set(receipt.clone());
        Some(receipt)
    }

    pub async fn create(&self, input: NewStockIn) -> Option<StockIn> {
        if let Err(err) = input.validate() {
            return self.detail.reject("stock_in.create", err);
        }
        let receipt = self
            .detail
            .run("stock_in.create", self.cases.create.execute(&input))
            .await?;
        tracing::info!(id = %receipt.id, reference_no = %receipt.reference_no, "stock-in created");
        self.list.prepend(receipt.clone());
        self.detail.set(receipt.clone());
        Some(receipt)
    }

    pub async fn change_status(&self, id: StockInId, status: StockInStatus) -> Option<StockIn> {
        if let Some(mut known) = self.known(id) {
            if let Err(err) = known.transition(status, Utc::now()) {
                return self.detail.reject("stock_in.change_status", err);
            }
        }
        let receipt = self
            .detail
            .run(
                "stock_in.change_status",
                self.cases.update_status.execute(id, status),
            )
            .await?;
        tracing::info!(id = %receipt.id, status = %receipt.status, "stock-in status changed");
        self.apply(receipt.clone());
        Some(receipt)
    }

    /// Set the received quantity of one line (absolute, not a delta).
    pub async fn receive_line(
        &self,
        id: StockInId,
        line: StockInLineId,
        received: i64,
    ) -> Option<StockIn> {
        if let Some(mut known) = self.known(id) {
            if let Err(err) = known.receive(line, received, Utc::now()) {
                return self.detail.reject("stock_in.receive_line", err);
            }
        }
        let receipt = self
            .detail
            .run(
                "stock_in.receive_line",
                self.cases.receive_line.execute(id, line, received),
            )
            .await?;
        tracing::info!(id = %receipt.id, line = %line, received, "stock-in line received");
        self.apply(receipt.clone());
        Some(receipt)
    }

    pub async fn delete(&self, id: StockInId) -> Option<()> {
        if self.known(id).is_some_and(|r| !r.is_deletable()) {
            return self.detail.reject(
                "stock_in.delete",
                DomainError::invariant("only pending receipts can be deleted"),
            );
        }
        self.detail
            .run("stock_in.delete", self.cases.delete.execute(id))
            .await?;
        tracing::info!(id = %id, "stock-in deleted");
        self.list.remove_where(|r| r.id == id);
        if self.detail.current().is_some_and(|r| r.id == id) {
            self.detail.clear();
        }
        Some(())
    }

    fn known(&self, id: StockInId) -> Option<StockIn> {
        self.detail
            .current()
            .filter(|r| r.id == id)
            .or_else(|| self.list.find(|r| r.id == id))
    }

    fn apply(&self, receipt: StockIn) {
        if self.detail.current().is_some_and(|r| r.id == receipt.id) {
            self.detail.set(receipt.clone());
        }
        let id = receipt.id;
        self.list.replace_where(|r| r.id == id, receipt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use wareflow_stock_in::{NewStockInLine, StockInFilter};

    use crate::mock::{MockStockInRepository, fixtures};

    fn store() -> StockInStore {
        StockInStore::new(
            StockInUseCases::new(Arc::new(MockStockInRepository::default())),
            10,
        )
    }

    fn fixture(status: StockInStatus) -> StockIn {
        fixtures::stock_ins(fixtures::STOCK_IN_FIXTURES)
            .into_iter()
            .rfind(|r| r.status == status)
            .unwrap()
    }

    #[tokio::test]
    async fn receiving_every_line_allows_completion() {
        let store = store();
        let receipt = fixture(StockInStatus::Receiving);
        store.select(receipt.id).await.unwrap();

        for line in &receipt.lines {
            store
                .receive_line(receipt.id, line.id, line.expected_quantity)
                .await
                .unwrap();
        }
        let current = store.detail().current().unwrap();
        assert_eq!(current.total_received(), current.total_expected());
        assert_eq!(current.progress(), 1.0);

        let done = store
            .change_status(receipt.id, StockInStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, StockInStatus::Completed);
    }

    #[tokio::test]
    async fn over_receipt_is_rejected_locally() {
        let store = store();
        let receipt = fixture(StockInStatus::Receiving);
        store.select(receipt.id).await;
        let line = &receipt.lines[0];

        assert_eq!(
            store
                .receive_line(receipt.id, line.id, line.expected_quantity + 1)
                .await,
            None
        );
        assert!(store.detail().snapshot().error.is_some());
        assert_eq!(store.detail().current().unwrap(), receipt);
    }

    #[tokio::test]
    async fn supplier_filter_narrows_the_list() {
        let store = store();
        store.load().await;
        let supplier = store.list().snapshot().results[0].supplier.clone();

        store
            .list()
            .update_filters(|f: &mut StockInFilter| f.supplier = Some(supplier.clone()))
            .await;
        let state = store.list().snapshot();
        assert!(state.count > 0);
        assert!(state.results.iter().all(|r| r.supplier == supplier));
    }

    #[tokio::test]
    async fn create_lands_pending_and_can_be_deleted() {
        let store = store();
        store.load().await;
        let created = store
            .create(NewStockIn {
                supplier: "Contoso".into(),
                warehouse: "WH1".into(),
                note: None,
                lines: vec![NewStockInLine {
                    product_code: "SKU-2".into(),
                    product_name: "Gloves".into(),
                    expected_quantity: 40,
                }],
            })
            .await
            .unwrap();
        assert_eq!(created.status, StockInStatus::Pending);
        assert_eq!(store.list().snapshot().count, fixtures::STOCK_IN_FIXTURES as u64 + 1);

        store.delete(created.id).await.unwrap();
        assert_eq!(store.list().snapshot().count, fixtures::STOCK_IN_FIXTURES as u64);
    }

    #[tokio::test]
    async fn cancelled_receipts_stay_put() {
        let store = store();
        let receipt = fixture(StockInStatus::Cancelled);
        store.select(receipt.id).await;
        assert_eq!(store.delete(receipt.id).await, None);
        assert_eq!(
            store.change_status(receipt.id, StockInStatus::Receiving).await,
            None
        );
    }
}
