use async_trait::async_trait;
use chrono::Utc;

use wareflow_core::{DomainError, Page, PageRequest};
use wareflow_picking::{
    NewPickingOrder, PickItemId, PickingFilter, PickingOrder, PickingOrderId, PickingOrderLine,
    PickingOrderProcessItem, PickingStatus, ensure_complete,
};

use super::{MockTable, Sequence, fixtures, page_of};
use crate::error::{ClientError, ClientResult};
use crate::repository::PickingRepository;

pub struct MockPickingRepository {
    orders: MockTable<PickingOrderId, PickingOrder>,
    items: MockTable<PickItemId, PickingOrderProcessItem>,
    sequence: Sequence,
}

impl Default for MockPickingRepository {
    fn default() -> Self {
        Self::with_orders(fixtures::picking_orders(fixtures::PICKING_FIXTURES))
    }
}

impl MockPickingRepository {
    pub fn with_orders(rows: impl IntoIterator<Item = (PickingOrder, Vec<PickingOrderProcessItem>)>) -> Self {
        let orders = MockTable::new();
        let items = MockTable::new();
        for (order, order_items) in rows {
            for item in order_items {
                items.upsert(item.id, item);
            }
            orders.upsert(order.id, order);
        }
        let sequence = Sequence::starting_after(orders.len());
        Self { orders, items, sequence }
    }

    fn items_of(&self, id: PickingOrderId) -> Vec<PickingOrderProcessItem> {
        let mut items: Vec<_> = self
            .items
            .list()
            .into_iter()
            .filter(|i| i.order_id == id)
            .collect();
        items.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.id.cmp(&b.id)));
        items
    }
}

#[async_trait]
impl PickingRepository for MockPickingRepository {
    async fn list(&self, filter: &PickingFilter, page: PageRequest) -> ClientResult<Page<PickingOrder>> {
        Ok(page_of(self.orders.list(), |o| filter.matches(o), page))
    }

    async fn get(&self, id: PickingOrderId) -> ClientResult<PickingOrder> {
        self.orders.get(&id).ok_or(ClientError::NotFound)
    }

    async fn create(&self, input: &NewPickingOrder) -> ClientResult<PickingOrder> {
        input.validate()?;
        let now = Utc::now();
        let number = self.sequence.next();
        let order = PickingOrder {
            id: PickingOrderId::generate(),
            order_no: format!("PO-{number:06}"),
            customer: input.customer.trim().to_string(),
            warehouse: input.warehouse.trim().to_string(),
            priority: input.priority,
            status: PickingStatus::Pending,
            assignee: None,
            due_at: input.due_at,
            lines: input
                .lines
                .iter()
                .enumerate()
                .map(|(i, l)| PickingOrderLine {
                    line_no: i as u32 + 1,
                    product_code: l.product_code.trim().to_string(),
                    product_name: l.product_name.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        for item in fixtures::process_items(&order, number as usize, |_| PickItemId::generate()) {
            self.items.upsert(item.id, item);
        }
        self.orders.upsert(order.id, order.clone());
        Ok(order)
    }

    async fn update_status(&self, id: PickingOrderId, status: PickingStatus) -> ClientResult<PickingOrder> {
        if status == PickingStatus::Completed {
            ensure_complete(&self.items_of(id))?;
        }
        let (order, ()) = self.orders.update(&id, |o| Ok(o.transition(status, Utc::now())?))?;
        Ok(order)
    }

    async fn items(&self, id: PickingOrderId) -> ClientResult<Vec<PickingOrderProcessItem>> {
        if self.orders.get(&id).is_none() {
            return Err(ClientError::NotFound);
        }
        Ok(self.items_of(id))
    }

    async fn record_pick(
        &self,
        id: PickingOrderId,
        item: PickItemId,
        picked: i64,
    ) -> ClientResult<PickingOrderProcessItem> {
        let order = self.orders.get(&id).ok_or(ClientError::NotFound)?;
        if order.status != PickingStatus::InProgress {
            return Err(DomainError::invariant("items can only be picked while the order is in progress").into());
        }
        let (updated, ()) = self.items.update(&item, |i| {
            if i.order_id != id {
                return Err(ClientError::NotFound);
            }
            Ok(i.record_pick(picked)?)
        })?;
        self.orders.update(&id, |o| {
            o.updated_at = Utc::now();
            Ok(())
        })?;
        Ok(updated)
    }

    async fn delete(&self, id: PickingOrderId) -> ClientResult<()> {
        let order = self.orders.get(&id).ok_or(ClientError::NotFound)?;
        if !order.is_deletable() {
            return Err(DomainError::invariant("only pending picking orders can be deleted").into());
        }
        for item in self.items_of(id) {
            self.items.remove(&item.id);
        }
        self.orders.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wareflow_picking::{NewPickingOrderLine, PickingPriority};

    fn new_order() -> NewPickingOrder {
        NewPickingOrder {
            customer: "Contoso".into(),
            warehouse: "WH1".into(),
            priority: PickingPriority::High,
            due_at: None,
            lines: vec![
                NewPickingOrderLine {
                    product_code: "SKU-1".into(),
                    product_name: "Bolt".into(),
                    quantity: 2,
                },
                NewPickingOrderLine {
                    product_code: "SKU-2".into(),
                    product_name: "Nut".into(),
                    quantity: 3,
                },
            ],
        }
    }

    #[tokio::test]
    async fn created_orders_get_process_items() {
        let repo = MockPickingRepository::with_orders(Vec::new());
        let order = repo.create(&new_order()).await.unwrap();
        assert_eq!(order.order_no, "PO-000001");

        let items = repo.items(order.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().map(|i| i.requested_quantity).sum::<i64>(), 5);
    }

    #[tokio::test]
    async fn completion_needs_every_item_picked() {
        let repo = MockPickingRepository::with_orders(Vec::new());
        let order = repo.create(&new_order()).await.unwrap();

        let items = repo.items(order.id).await.unwrap();
        assert!(repo.record_pick(order.id, items[0].id, 1).await.is_err());

        repo.update_status(order.id, PickingStatus::InProgress).await.unwrap();
        repo.record_pick(order.id, items[0].id, items[0].requested_quantity).await.unwrap();
        assert!(repo.update_status(order.id, PickingStatus::Completed).await.is_err());

        repo.record_pick(order.id, items[1].id, items[1].requested_quantity).await.unwrap();
        let done = repo.update_status(order.id, PickingStatus::Completed).await.unwrap();
        assert_eq!(done.status, PickingStatus::Completed);
    }

    #[tokio::test]
    async fn over_pick_is_rejected() {
        let repo = MockPickingRepository::with_orders(Vec::new());
        let order = repo.create(&new_order()).await.unwrap();
        repo.update_status(order.id, PickingStatus::InProgress).await.unwrap();
        let item = &repo.items(order.id).await.unwrap()[0];

        let err = repo
            .record_pick(order.id, item.id, item.requested_quantity + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Domain(DomainError::Validation(_))));
        assert_eq!(repo.items(order.id).await.unwrap()[0].picked_quantity, 0);
    }

    #[tokio::test]
    async fn order_numbers_are_not_reused_after_delete() {
        let repo = MockPickingRepository::with_orders(Vec::new());
        let first = repo.create(&new_order()).await.unwrap();
        let second = repo.create(&new_order()).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let third = repo.create(&new_order()).await.unwrap();
        assert_ne!(third.order_no, second.order_no);
        assert_eq!(third.order_no, "PO-000003");
    }

    #[tokio::test]
    async fn delete_removes_items_too() {
        let repo = MockPickingRepository::with_orders(Vec::new());
        let order = repo.create(&new_order()).await.unwrap();
        repo.delete(order.id).await.unwrap();
        assert!(repo.items(order.id).await.unwrap_err().is_not_found());
        assert!(repo.items.is_empty());
    }
}
