use std::future::Future;

use tokio::sync::watch;

use wareflow_core::DomainError;

use crate::error::ClientResult;

/// The record a detail screen is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState<T> {
    pub current: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for DetailState<T> {
    fn default() -> Self {
        Self {
            current: None,
            loading: false,
            error: None,
        }
    }
}

/// Observable single-record state plus the error bookkeeping shared by
/// every feature store mutation.
pub struct DetailStore<T> {
    state: watch::Sender<DetailState<T>>,
}

impl<T: Clone + Send + Sync + 'static> Default for DetailStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> DetailStore<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DetailState<T> {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> Option<T> {
        self.state.borrow().current.clone()
    }

    pub fn set(&self, value: T) {
        self.state.send_modify(|s| {
            s.current = Some(value);
            s.error = None;
        });
    }

    pub fn clear(&self) {
        self.state.send_replace(DetailState::default());
    }

    /// Drop the record but keep whatever error the last call left.
    pub fn clear_current(&self) {
        self.state.send_modify(|s| {
            s.current = None;
            s.loading = false;
        });
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    /// Run a backend call with the loading flag raised.
    ///
    /// On failure the error is logged and stored and `None` comes back.
    pub async fn run<R>(&self, op: &'static str, fut: impl Future<Output = ClientResult<R>>) -> Option<R> {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        let result = fut.await;
        match result {
            Ok(value) => {
                self.state.send_modify(|s| s.loading = false);
                Some(value)
            }
            Err(err) => {
                tracing::error!(op, error = %err, "request failed");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(err.to_string());
                });
                None
            }
        }
    }

    /// Record a failed local check without touching the backend.
    pub fn reject<R>(&self, op: &'static str, err: DomainError) -> Option<R> {
        tracing::warn!(op, error = %err, "rejected before sending");
        self.state.send_modify(|s| s.error = Some(err.to_string()));
        None
    }
}
