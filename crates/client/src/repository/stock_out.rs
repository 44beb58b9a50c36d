use std::sync::Arc;

use async_trait::async_trait;

use wareflow_core::{Lifecycle, Page, PageRequest};
use wareflow_stock_out::{NewStockOut, StockOut, StockOutFilter, StockOutId, StockOutStatus};

use super::decoded;
use crate::dto::{ListResponse, StatusUpdate, StockOutDto};
use crate::error::ClientResult;
use crate::http::{HttpClient, Query, QueryParams, list_query, push_created, push_text};

const BASE: &str = "/api/stock-out";

#[async_trait]
pub trait StockOutRepository: Send + Sync {
    async fn list(&self, filter: &StockOutFilter, page: PageRequest) -> ClientResult<Page<StockOut>>;

    async fn get(&self, id: StockOutId) -> ClientResult<StockOut>;

    async fn create(&self, input: &NewStockOut) -> ClientResult<StockOut>;

    async fn update_status(&self, id: StockOutId, status: StockOutStatus) -> ClientResult<StockOut>;

    async fn delete(&self, id: StockOutId) -> ClientResult<()>;
}

impl QueryParams for StockOutFilter {
    fn query_pairs(&self) -> Query {
        let mut query = Query::new();
        push_text(&mut query, "status", self.status.as_ref().map(|s| s.as_str()));
        push_text(&mut query, "warehouse", self.warehouse.as_deref());
        push_text(&mut query, "destination", self.destination.as_deref());
        push_text(&mut query, "search", self.search.as_deref());
        push_created(&mut query, &self.created);
        query
    }
}

pub struct HttpStockOutRepository {
    http: Arc<HttpClient>,
}

impl HttpStockOutRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl StockOutRepository for HttpStockOutRepository {
    async fn list(&self, filter: &StockOutFilter, page: PageRequest) -> ClientResult<Page<StockOut>> {
        let body: ListResponse<StockOutDto> = self.http.get_json(BASE, &list_query(filter, page)).await?;
        decoded(body.into_page(page))
    }

    async fn get(&self, id: StockOutId) -> ClientResult<StockOut> {
        let dto: StockOutDto = self.http.get_json(&format!("{BASE}/{id}"), &[]).await?;
        decoded(dto.try_into())
    }

    async fn create(&self, input: &NewStockOut) -> ClientResult<StockOut> {
        let dto: StockOutDto = self.http.post_json(BASE, input).await?;
        decoded(dto.try_into())
    }

    async fn update_status(&self, id: StockOutId, status: StockOutStatus) -> ClientResult<StockOut> {
        let dto: StockOutDto = self
            .http
            .patch_json(&format!("{BASE}/{id}/status"), &StatusUpdate::new(status.as_str()))
            .await?;
        decoded(dto.try_into())
    }

    async fn delete(&self, id: StockOutId) -> ClientResult<()> {
        self.http.delete(&format!("{BASE}/{id}")).await
    }
}
