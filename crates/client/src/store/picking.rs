use chrono::Utc;

use wareflow_core::DomainError;
use wareflow_picking::{
    NewPickingOrder, PickItemId, PickingOrder, PickingOrderId, PickingOrderProcessItem,
    PickingStatus, PickingSummary, ensure_complete, summarize,
};

use super::{DetailStore, ListStore};
use crate::usecase::{ListPickingOrders, PickingUseCases};

/// An order opened on the picking screen, with its items and their
/// location grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOrder {
    pub order: PickingOrder,
    pub items: Vec<PickingOrderProcessItem>,
    pub summary: PickingSummary,
}

impl OpenOrder {
    fn new(order: PickingOrder, items: Vec<PickingOrderProcessItem>) -> Self {
        let summary = summarize(&items);
        Self {
            order,
            items,
            summary,
        }
    }

    fn with_item(mut self, updated: PickingOrderProcessItem) -> Self {
        if let Some(slot) = self.items.iter_mut().find(|i| i.id == updated.id) {
            *slot = updated;
        }
        self.summary = summarize(&self.items);
        self
    }
}

pub struct PickingStore {
    cases: PickingUseCases,
    list: ListStore<ListPickingOrders>,
    open: DetailStore<OpenOrder>,
}

impl PickingStore {
    pub fn new(cases: PickingUseCases, page_size: u32) -> Self {
        Self {
            list: ListStore::new(cases.list.clone(), page_size),
            open: DetailStore::new(),
            cases,
        }
    }

    pub fn list(&self) -> &ListStore<ListPickingOrders> {
        &self.list
    }

    pub fn open(&self) -> &DetailStore<OpenOrder> {
        &self.open
    }

    pub fn summary(&self) -> Option<PickingSummary> {
        self.open.current().map(|o| o.summary)
    }

    pub async fn load(&self) -> Option<usize> {
        self.list.load().await
    }

    /// Fetch an order and its process items and group them by location.
    pub async fn open_order(&self, id: PickingOrderId) -> Option<PickingSummary> {
        let fetch = async {
            tokio::try_join!(self.cases.get.execute(id), self.cases.items.execute(id))
        };
        let (order, items) = self.open.run("picking.open_order", fetch).await?;
        let opened = OpenOrder::new(order, items);
        tracing::info!(
            id = %opened.order.id,
            items = opened.items.len(),
            locations = opened.summary.groups.len(),
            "picking order opened"
        );
        let summary = opened.summary.clone();
        self.open.set(opened);
        Some(summary)
    }

    /// Set the picked quantity of one item on the open order.
    pub async fn record_pick(&self, item: PickItemId, picked: i64) -> Option<PickingSummary> {
        let opened = match self.open_in_progress("picking.record_pick") {
            Ok(opened) => opened,
            Err(err) => return self.open.reject("picking.record_pick", err),
        };
        let Some(mut local) = opened.items.iter().find(|i| i.id == item).cloned() else {
            return self.open.reject("picking.record_pick", DomainError::not_found());
        };
        if let Err(err) = local.record_pick(picked) {
            return self.open.reject("picking.record_pick", err);
        }

        let updated = self
            .open
            .run(
                "picking.record_pick",
                self.cases.record_pick.execute(opened.order.id, item, picked),
            )
            .await?;
        tracing::info!(order = %opened.order.id, item = %item, picked, "pick recorded");
        let opened = opened.with_item(updated);
        let summary = opened.summary.clone();
        self.open.set(opened);
        Some(summary)
    }

    /// Mark every item at one location as fully picked.
    pub async fn pick_location(&self, key: &str) -> Option<PickingSummary> {
        let opened = match self.open_in_progress("picking.pick_location") {
            Ok(opened) => opened,
            Err(err) => return self.open.reject("picking.pick_location", err),
        };
        let Some(group) = opened.summary.groups.iter().find(|g| g.key == key) else {
            return self.open.reject(
                "picking.pick_location",
                DomainError::validation(format!("order has nothing to pick at {key}")),
            );
        };

        let mut summary = opened.summary.clone();
        for item in group.items.iter().filter(|i| !i.is_picked()) {
            summary = self.record_pick(item.id, item.requested_quantity).await?;
        }
        Some(summary)
    }

    pub async fn start(&self) -> Option<PickingOrder> {
        self.transition("picking.start", PickingStatus::InProgress).await
    }

    /// Finish the open order; every item must be fully picked.
    pub async fn complete(&self) -> Option<PickingOrder> {
        self.transition("picking.complete", PickingStatus::Completed).await
    }

    pub async fn cancel(&self) -> Option<PickingOrder> {
        self.transition("picking.cancel", PickingStatus::Cancelled).await
    }

    pub async fn create(&self, input: NewPickingOrder) -> Option<PickingOrder> {
        if let Err(err) = input.validate() {
            return self.open.reject("picking.create", err);
        }
        let order = self
            .open
            .run("picking.create", self.cases.create.execute(&input))
            .await?;
        tracing::info!(id = %order.id, order_no = %order.order_no, "picking order created");
        self.list.prepend(order.clone());
        Some(order)
    }

    pub async fn delete(&self, id: PickingOrderId) -> Option<()> {
        let known = self
            .open
            .current()
            .map(|o| o.order)
            .filter(|o| o.id == id)
            .or_else(|| self.list.find(|o| o.id == id));
        if known.is_some_and(|o| !o.is_deletable()) {
            return self.open.reject(
                "picking.delete",
                DomainError::invariant("only pending picking orders can be deleted"),
            );
        }
        self.open
            .run("picking.delete", self.cases.delete.execute(id))
            .await?;
        tracing::info!(id = %id, "picking order deleted");
        self.list.remove_where(|o| o.id == id);
        if self.open.current().is_some_and(|o| o.order.id == id) {
            self.open.clear();
        }
        Some(())
    }

    async fn transition(&self, op: &'static str, next: PickingStatus) -> Option<PickingOrder> {
        let Some(opened) = self.open.current() else {
            return self.open.reject(op, DomainError::invariant("no picking order is open"));
        };
        let mut local = opened.order.clone();
        let checked = local.transition(next, Utc::now()).and_then(|()| match next {
            PickingStatus::Completed => ensure_complete(&opened.items),
            _ => Ok(()),
        });
        if let Err(err) = checked {
            return self.open.reject(op, err);
        }

        let order = self
            .open
            .run(op, self.cases.update_status.execute(opened.order.id, next))
            .await?;
        tracing::info!(id = %order.id, status = %order.status, "picking status changed");
        let id = order.id;
        self.list.replace_where(|o| o.id == id, order.clone());
        self.open.set(OpenOrder {
            order: order.clone(),
            ..opened
        });
        Some(order)
    }

    fn open_in_progress(&self, op: &'static str) -> Result<OpenOrder, DomainError> {
        let opened = self
            .open
            .current()
            .ok_or_else(|| DomainError::invariant("no picking order is open"))?;
        if opened.order.status != PickingStatus::InProgress {
            tracing::debug!(op, status = %opened.order.status, "order is not being picked");
            return Err(DomainError::invariant(
                "items can only be picked while the order is in progress",
            ));
        }
        Ok(opened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use wareflow_picking::{NewPickingOrderLine, PickingPriority};

    use crate::mock::{MockPickingRepository, fixtures};

    fn store() -> PickingStore {
        PickingStore::new(
            PickingUseCases::new(Arc::new(MockPickingRepository::default())),
            10,
        )
    }

    fn fixture(status: PickingStatus) -> (PickingOrder, Vec<PickingOrderProcessItem>) {
        fixtures::picking_orders(fixtures::PICKING_FIXTURES)
            .into_iter()
            .rfind(|(o, _)| o.status == status)
            .unwrap()
    }

    #[tokio::test]
    async fn opening_an_order_groups_its_items() {
        let store = store();
        let (order, items) = fixture(PickingStatus::InProgress);

        let summary = store.open_order(order.id).await.unwrap();
        assert_eq!(summary.progress.items_total, items.len());
        assert_eq!(summary.groups.len(), items.len().div_ceil(2));
        assert!(summary.progress.items_done < items.len());
        assert_eq!(store.summary(), Some(summary));
    }

    #[tokio::test]
    async fn complete_waits_for_every_item() {
        let store = store();
        let (order, _) = fixture(PickingStatus::InProgress);
        let summary = store.open_order(order.id).await.unwrap();

        assert_eq!(store.complete().await, None);
        assert!(store.open().snapshot().error.unwrap().contains("not fully picked"));

        let open_keys: Vec<String> = summary
            .groups
            .iter()
            .filter(|g| !g.is_complete())
            .map(|g| g.key.clone())
            .collect();
        for key in &open_keys {
            store.pick_location(key).await.unwrap();
        }
        let summary = store.summary().unwrap();
        assert!(summary.progress.is_complete());
        assert_eq!(summary.progress.percent(), 100);

        let done = store.complete().await.unwrap();
        assert_eq!(done.status, PickingStatus::Completed);
    }

    #[tokio::test]
    async fn over_pick_is_rejected_locally() {
        let store = store();
        let (order, items) = fixture(PickingStatus::InProgress);
        store.open_order(order.id).await;

        let item = &items[0];
        assert_eq!(store.record_pick(item.id, item.requested_quantity + 1).await, None);
        let picked = store.summary().unwrap().progress.picked;
        assert_eq!(picked, items.iter().map(|i| i.picked_quantity).sum::<i64>());
    }

    #[tokio::test]
    async fn pending_orders_must_be_started_first() {
        let store = store();
        store.load().await;
        let (order, items) = fixture(PickingStatus::Pending);
        store.open_order(order.id).await;

        assert_eq!(store.record_pick(items[0].id, 1).await, None);
        assert_eq!(store.complete().await, None);
        let error = store.open().snapshot().error.unwrap();
        assert!(error.contains("invalid status transition"), "{error}");

        let started = store.start().await.unwrap();
        assert_eq!(started.status, PickingStatus::InProgress);
        assert!(store.record_pick(items[0].id, 1).await.is_some());

        let listed = store.list().find(|o| o.id == order.id).unwrap();
        assert_eq!(listed.status, PickingStatus::InProgress);

        let cancelled = store.cancel().await.unwrap();
        assert_eq!(cancelled.status, PickingStatus::Cancelled);
        assert_eq!(store.start().await, None);
    }

    #[tokio::test]
    async fn unknown_location_is_rejected() {
        let store = store();
        let (order, _) = fixture(PickingStatus::InProgress);
        store.open_order(order.id).await;
        assert_eq!(store.pick_location("WH9/Z/99/9/9/9").await, None);
    }

    #[tokio::test]
    async fn create_and_delete() {
        let store = store();
        store.load().await;
        let created = store
            .create(NewPickingOrder {
                customer: "Northwind".into(),
                warehouse: "WH1".into(),
                priority: PickingPriority::High,
                due_at: None,
                lines: vec![NewPickingOrderLine {
                    product_code: "SKU-4".into(),
                    product_name: "Tape".into(),
                    quantity: 3,
                }],
            })
            .await
            .unwrap();
        assert_eq!(store.list().snapshot().results[0].id, created.id);

        let summary = store.open_order(created.id).await.unwrap();
        assert_eq!(summary.progress.requested, 3);

        store.delete(created.id).await.unwrap();
        assert_eq!(store.open().current(), None);
        assert!(store.list().find(|o| o.id == created.id).is_none());
    }
}
