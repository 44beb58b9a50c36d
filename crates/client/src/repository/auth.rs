use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use wareflow_auth::{Credentials, Session, UserProfile};

use super::decoded;
use crate::dto::{LoginResponse, UserProfileDto};
use crate::error::ClientResult;
use crate::http::HttpClient;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ClientResult<Session>;

    async fn logout(&self) -> ClientResult<()>;

    /// Profile of whoever the current token belongs to.
    async fn me(&self) -> ClientResult<UserProfile>;
}

/// Login stores the token on the shared [`HttpClient`], so every other HTTP
/// repository is authenticated from then on; logout clears it.
pub struct HttpAuthRepository {
    http: Arc<HttpClient>,
}

impl HttpAuthRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, credentials: &Credentials) -> ClientResult<Session> {
        let response: LoginResponse = self.http.post_json("/api/auth/login", credentials).await?;
        let session = decoded(response.into_session(Utc::now()))?;
        self.http.set_token(Some(session.access_token.clone()));
        tracing::info!(username = %session.user.username, "signed in");
        Ok(session)
    }

    async fn logout(&self) -> ClientResult<()> {
        let result = self.http.post_empty("/api/auth/logout").await;
        self.http.set_token(None);
        result
    }

    async fn me(&self) -> ClientResult<UserProfile> {
        let dto: UserProfileDto = self.http.get_json("/api/auth/me", &[]).await?;
        decoded(dto.try_into())
    }
}
