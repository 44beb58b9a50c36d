use chrono::{DateTime, Utc};

use wareflow_auth::{Credentials, Session, SessionError, UserProfile, validate_session};

use super::DetailStore;
use crate::usecase::AuthUseCases;

/// Who is signed in.
pub struct AuthStore {
    cases: AuthUseCases,
    session: DetailStore<Session>,
}

impl AuthStore {
    pub fn new(cases: AuthUseCases) -> Self {
        Self {
            cases,
            session: DetailStore::new(),
        }
    }

    pub fn session(&self) -> &DetailStore<Session> {
        &self.session
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.session.current().map(|s| s.user)
    }

    pub async fn login(&self, credentials: Credentials) -> Option<Session> {
        if let Err(err) = credentials.validate() {
            return self.session.reject("auth.login", err);
        }
        let session = self
            .session
            .run("auth.login", self.cases.login.execute(&credentials))
            .await?;
        tracing::info!(username = %session.user.username, expires_at = %session.expires_at, "signed in");
        self.session.set(session.clone());
        Some(session)
    }

    /// Drops the local session even when the backend call fails; the
    /// failure is still reported through `error`.
    pub async fn logout(&self) {
        self.session.run("auth.logout", self.cases.logout.execute()).await;
        self.session.clear_current();
        tracing::info!("signed out");
    }

    /// Re-read the profile of the signed-in user.
    pub async fn refresh_profile(&self) -> Option<UserProfile> {
        let profile = self
            .session
            .run("auth.refresh_profile", self.cases.current_user.execute())
            .await?;
        if let Some(mut session) = self.session.current() {
            session.user = profile.clone();
            self.session.set(session);
        }
        Some(profile)
    }

    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.session.current().is_some_and(|s| s.is_valid_at(now))
    }

    /// The current session if it is still valid at `now`.
    ///
    /// An expired or malformed session is dropped.
    pub fn ensure_session(&self, now: DateTime<Utc>) -> Result<Session, SessionError> {
        let session = self.session.current().ok_or(SessionError::NoSession)?;
        if let Err(err) = validate_session(&session, now) {
            tracing::warn!(error = %err, "discarding session");
            self.session.clear();
            return Err(err);
        }
        Ok(session)
    }

    /// Cancelling counts and orders is reserved for supervisors and admins.
    pub fn can_cancel(&self) -> bool {
        self.user().is_some_and(|u| u.role.can_cancel())
    }
}
