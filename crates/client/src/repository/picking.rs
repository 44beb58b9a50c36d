use std::sync::Arc;

use async_trait::async_trait;

use wareflow_core::{Lifecycle, Page, PageRequest};
use wareflow_picking::{
    NewPickingOrder, PickItemId, PickingFilter, PickingOrder, PickingOrderId,
    PickingOrderProcessItem, PickingStatus,
};

use super::decoded;
use crate::dto::{ListResponse, PickUpdate, PickingOrderDto, ProcessItemDto, StatusUpdate};
use crate::error::ClientResult;
use crate::http::{HttpClient, Query, QueryParams, list_query, push_created, push_text};

const BASE: &str = "/api/picking-orders";

#[async_trait]
pub trait PickingRepository: Send + Sync {
    async fn list(&self, filter: &PickingFilter, page: PageRequest) -> ClientResult<Page<PickingOrder>>;

    async fn get(&self, id: PickingOrderId) -> ClientResult<PickingOrder>;

    async fn create(&self, input: &NewPickingOrder) -> ClientResult<PickingOrder>;

    async fn update_status(&self, id: PickingOrderId, status: PickingStatus) -> ClientResult<PickingOrder>;

    /// Location-bound process items of one order.
    async fn items(&self, id: PickingOrderId) -> ClientResult<Vec<PickingOrderProcessItem>>;

    /// Set the picked quantity of one item (absolute).
    async fn record_pick(
        &self,
        id: PickingOrderId,
        item: PickItemId,
        picked: i64,
    ) -> ClientResult<PickingOrderProcessItem>;

    async fn delete(&self, id: PickingOrderId) -> ClientResult<()>;
}

impl QueryParams for PickingFilter {
    fn query_pairs(&self) -> Query {
        let mut query = Query::new();
        push_text(&mut query, "status", self.status.as_ref().map(|s| s.as_str()));
        push_text(&mut query, "priority", self.priority.as_ref().map(|p| p.as_str()));
        push_text(&mut query, "warehouse", self.warehouse.as_deref());
        push_text(&mut query, "assignee", self.assignee.as_deref());
        push_text(&mut query, "search", self.search.as_deref());
        push_created(&mut query, &self.created);
        query
    }
}

pub struct HttpPickingRepository {
    http: Arc<HttpClient>,
}

impl HttpPickingRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PickingRepository for HttpPickingRepository {
    async fn list(&self, filter: &PickingFilter, page: PageRequest) -> ClientResult<Page<PickingOrder>> {
        let body: ListResponse<PickingOrderDto> =
            self.http.get_json(BASE, &list_query(filter, page)).await?;
        decoded(body.into_page(page))
    }

    async fn get(&self, id: PickingOrderId) -> ClientResult<PickingOrder> {
        let dto: PickingOrderDto = self.http.get_json(&format!("{BASE}/{id}"), &[]).await?;
        decoded(dto.try_into())
    }

    async fn create(&self, input: &NewPickingOrder) -> ClientResult<PickingOrder> {
        let dto: PickingOrderDto = self.http.post_json(BASE, input).await?;
        decoded(dto.try_into())
    }

    async fn update_status(&self, id: PickingOrderId, status: PickingStatus) -> ClientResult<PickingOrder> {
        let dto: PickingOrderDto = self
            .http
            .patch_json(&format!("{BASE}/{id}/status"), &StatusUpdate::new(status.as_str()))
            .await?;
        decoded(dto.try_into())
    }

    async fn items(&self, id: PickingOrderId) -> ClientResult<Vec<PickingOrderProcessItem>> {
        let dtos: Vec<ProcessItemDto> = self.http.get_json(&format!("{BASE}/{id}/items"), &[]).await?;
        decoded(
            dtos.into_iter()
                .map(PickingOrderProcessItem::try_from)
                .collect(),
        )
    }

    async fn record_pick(
        &self,
        id: PickingOrderId,
        item: PickItemId,
        picked: i64,
    ) -> ClientResult<PickingOrderProcessItem> {
        let dto: ProcessItemDto = self
            .http
            .patch_json(
                &format!("{BASE}/{id}/items/{item}"),
                &PickUpdate {
                    picked_quantity: picked,
                },
            )
            .await?;
        decoded(dto.try_into())
    }

    async fn delete(&self, id: PickingOrderId) -> ClientResult<()> {
        self.http.delete(&format!("{BASE}/{id}")).await
    }
}
