//! Client error model.

use thiserror::Error;

use wareflow_core::DomainError;

pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong between a store and the backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// 401/403, or a mock backend rejecting the credentials.
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// The response body did not match the expected wire shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Missing record, whether reported by the transport or the domain.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::Domain(DomainError::NotFound))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Domain(DomainError::Unauthorized))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => Self::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
