//! HTTP transport shared by every HTTP repository.

use std::sync::{PoisonError, RwLock};

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use wareflow_core::{DateRange, PageRequest};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Query string pairs, in the order they are sent.
pub type Query = Vec<(&'static str, String)>;

/// Turns a list filter into query pairs. Empty values are omitted.
pub trait QueryParams {
    fn query_pairs(&self) -> Query;
}

/// `page`/`page_size` followed by the filter's own pairs.
pub fn list_query<F: QueryParams + ?Sized>(filter: &F, page: PageRequest) -> Query {
    let mut query = vec![
        ("page", page.page.to_string()),
        ("page_size", page.page_size.to_string()),
    ];
    query.extend(filter.query_pairs());
    query
}

/// Push `key=value` unless the value is missing or blank.
pub fn push_text(query: &mut Query, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        query.push((key, v.to_string()));
    }
}

/// Push `created_from` / `created_to` as ISO dates.
pub fn push_created(query: &mut Query, range: &DateRange) {
    if let Some(from) = range.from {
        query.push(("created_from", from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = range.to {
        query.push(("created_to", to.format("%Y-%m-%d").to_string()));
    }
}

/// `reqwest::Client` plus base URL and a swappable bearer token.
#[derive(Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            inner,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(config.auth_token.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = self.authorize(request).send().await?;
        check_status(response).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let response = self.send(self.inner.get(self.url(path)).query(query)).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self.send(self.inner.post(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST without a body, ignoring whatever comes back.
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        tracing::debug!(path, "POST");
        self.send(self.inner.post(self.url(path))).await?;
        Ok(())
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "PATCH");
        let response = self.send(self.inner.patch(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        tracing::debug!(path, "DELETE");
        self.send(self.inner.delete(self.url(path))).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        _ => {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            tracing::warn!(status = status.as_u16(), %message, "backend returned an error");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, then `detail`, then `error`; falls back to the raw
/// body when it is not JSON.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "detail", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}
