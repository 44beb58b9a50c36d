//! Observable stores.
//!
//! A store owns the state a screen renders (rows, filters, pagination, the
//! selected record, loading and error flags) in a `tokio::sync::watch`
//! channel. Front ends subscribe and re-render on change; stores call use
//! cases and never talk to a repository directly.
//!
//! Failures never escape a store: they are logged, written to the store's
//! `error` field, and the operation returns `None`.

pub mod auth;
pub mod detail;
pub mod inventory;
pub mod list;
pub mod picking;
pub mod stock_in;
pub mod stock_out;

pub use auth::AuthStore;
pub use detail::{DetailState, DetailStore};
pub use inventory::InventoryStore;
pub use list::{ListSource, ListState, ListStore};
pub use picking::{OpenOrder, PickingStore};
pub use stock_in::StockInStore;
pub use stock_out::StockOutStore;
