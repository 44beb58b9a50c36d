use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use wareflow_auth::{Credentials, Session, UserProfile};

use super::fixtures;
use crate::error::{ClientError, ClientResult};
use crate::repository::AuthRepository;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo";

const SESSION_TTL_HOURS: i64 = 8;

/// Accepts the demo credentials only.
#[derive(Debug, Default)]
pub struct MockAuthRepository {
    session: RwLock<Option<Session>>,
}

impl MockAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthRepository for MockAuthRepository {
    async fn login(&self, credentials: &Credentials) -> ClientResult<Session> {
        credentials.validate()?;
        if credentials.username.trim() != DEMO_USERNAME || credentials.password != DEMO_PASSWORD {
            tracing::warn!(username = %credentials.username, "mock login rejected");
            return Err(ClientError::Unauthorized);
        }
        let now = Utc::now();
        let session = Session {
            access_token: format!("mock-{}", Uuid::now_v7().simple()),
            user: fixtures::demo_user(),
            issued_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        };
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(session)
    }

    async fn logout(&self) -> ClientResult<()> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    async fn me(&self) -> ClientResult<UserProfile> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.user.clone())
            .ok_or(ClientError::Unauthorized)
    }
}
