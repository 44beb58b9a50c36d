use std::sync::Arc;

use async_trait::async_trait;

use wareflow_core::{Lifecycle, Page, PageRequest};
use wareflow_inventory::{
    InventoryFilter, InventoryLineId, InventoryRecord, InventoryRecordId, InventoryStatus,
    NewInventoryRecord,
};

use super::decoded;
use crate::dto::{CountUpdate, InventoryRecordDto, ListResponse, StatusUpdate};
use crate::error::ClientResult;
use crate::http::{HttpClient, Query, QueryParams, list_query, push_created, push_text};

const BASE: &str = "/api/inventory";

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn list(&self, filter: &InventoryFilter, page: PageRequest) -> ClientResult<Page<InventoryRecord>>;

    async fn get(&self, id: InventoryRecordId) -> ClientResult<InventoryRecord>;

    async fn create(&self, input: &NewInventoryRecord) -> ClientResult<InventoryRecord>;

    async fn update_status(&self, id: InventoryRecordId, status: InventoryStatus) -> ClientResult<InventoryRecord>;

    async fn record_count(
        &self,
        id: InventoryRecordId,
        line: InventoryLineId,
        counted: i64,
    ) -> ClientResult<InventoryRecord>;

    async fn delete(&self, id: InventoryRecordId) -> ClientResult<()>;
}

impl QueryParams for InventoryFilter {
    fn query_pairs(&self) -> Query {
        let mut query = Query::new();
        push_text(&mut query, "status", self.status.as_ref().map(|s| s.as_str()));
        push_text(&mut query, "warehouse", self.warehouse.as_deref());
        push_text(&mut query, "search", self.search.as_deref());
        push_created(&mut query, &self.created);
        query
    }
}

pub struct HttpInventoryRepository {
    http: Arc<HttpClient>,
}

impl HttpInventoryRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl InventoryRepository for HttpInventoryRepository {
    async fn list(&self, filter: &InventoryFilter, page: PageRequest) -> ClientResult<Page<InventoryRecord>> {
        let body: ListResponse<InventoryRecordDto> =
            self.http.get_json(BASE, &list_query(filter, page)).await?;
        decoded(body.into_page(page))
    }

    async fn get(&self, id: InventoryRecordId) -> ClientResult<InventoryRecord> {
        let dto: InventoryRecordDto = self.http.get_json(&format!("{BASE}/{id}"), &[]).await?;
        decoded(dto.try_into())
    }

    async fn create(&self, input: &NewInventoryRecord) -> ClientResult<InventoryRecord> {
        let dto: InventoryRecordDto = self.http.post_json(BASE, input).await?;
        decoded(dto.try_into())
    }

    async fn update_status(&self, id: InventoryRecordId, status: InventoryStatus) -> ClientResult<InventoryRecord> {
        let dto: InventoryRecordDto = self
            .http
            .patch_json(&format!("{BASE}/{id}/status"), &StatusUpdate::new(status.as_str()))
            .await?;
        decoded(dto.try_into())
    }

    async fn record_count(
        &self,
        id: InventoryRecordId,
        line: InventoryLineId,
        counted: i64,
    ) -> ClientResult<InventoryRecord> {
        let dto: InventoryRecordDto = self
            .http
            .patch_json(
                &format!("{BASE}/{id}/lines/{line}"),
                &CountUpdate {
                    counted_quantity: counted,
                },
            )
            .await?;
        decoded(dto.try_into())
    }

    async fn delete(&self, id: InventoryRecordId) -> ClientResult<()> {
        self.http.delete(&format!("{BASE}/{id}")).await
    }
}
