use std::sync::Arc;

use async_trait::async_trait;

use wareflow_core::{Lifecycle, Page, PageRequest};
use wareflow_stock_in::{NewStockIn, StockIn, StockInFilter, StockInId, StockInLineId, StockInStatus};

use super::decoded;
use crate::dto::{ListResponse, ReceiveUpdate, StatusUpdate, StockInDto};
use crate::error::ClientResult;
use crate::http::{HttpClient, Query, QueryParams, list_query, push_created, push_text};

const BASE: &str = "/api/stock-in";

#[async_trait]
pub trait StockInRepository: Send + Sync {
    async fn list(&self, filter: &StockInFilter, page: PageRequest) -> ClientResult<Page<StockIn>>;

    async fn get(&self, id: StockInId) -> ClientResult<StockIn>;

    async fn create(&self, input: &NewStockIn) -> ClientResult<StockIn>;

    async fn update_status(&self, id: StockInId, status: StockInStatus) -> ClientResult<StockIn>;

    async fn receive_line(&self, id: StockInId, line: StockInLineId, received: i64) -> ClientResult<StockIn>;

    async fn delete(&self, id: StockInId) -> ClientResult<()>;
}

impl QueryParams for StockInFilter {
    fn query_pairs(&self) -> Query {
        let mut query = Query::new();
        push_text(&mut query, "status", self.status.as_ref().map(|s| s.as_str()));
        push_text(&mut query, "warehouse", self.warehouse.as_deref());
        push_text(&mut query, "supplier", self.supplier.as_deref());
        push_text(&mut query, "search", self.search.as_deref());
        push_created(&mut query, &self.created);
        query
    }
}

pub struct HttpStockInRepository {
    http: Arc<HttpClient>,
}

impl HttpStockInRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl StockInRepository for HttpStockInRepository {
    async fn list(&self, filter: &StockInFilter, page: PageRequest) -> ClientResult<Page<StockIn>> {
        let body: ListResponse<StockInDto> = self.http.get_json(BASE, &list_query(filter, page)).await?;
        decoded(body.into_page(page))
    }

    async fn get(&self, id: StockInId) -> ClientResult<StockIn> {
        let dto: StockInDto = self.http.get_json(&format!("{BASE}/{id}"), &[]).await?;
        decoded(dto.try_into())
    }

    async fn create(&self, input: &NewStockIn) -> ClientResult<StockIn> {
        let dto: StockInDto = self.http.post_json(BASE, input).await?;
        decoded(dto.try_into())
    }

    async fn update_status(&self, id: StockInId, status: StockInStatus) -> ClientResult<StockIn> {
        let dto: StockInDto = self
            .http
            .patch_json(&format!("{BASE}/{id}/status"), &StatusUpdate::new(status.as_str()))
            .await?;
        decoded(dto.try_into())
    }

    async fn receive_line(&self, id: StockInId, line: StockInLineId, received: i64) -> ClientResult<StockIn> {
        let dto: StockInDto = self
            .http
            .patch_json(
                &format!("{BASE}/{id}/lines/{line}"),
                &ReceiveUpdate {
                    received_quantity: received,
                },
            )
            .await?;
        decoded(dto.try_into())
    }

    async fn delete(&self, id: StockInId) -> ClientResult<()> {
        self.http.delete(&format!("{BASE}/{id}")).await
    }
}
