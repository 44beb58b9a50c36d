//! `wareflow-client`
//!
//! **Responsibility:** everything between a warehouse screen and the backend.
//!
//! This crate provides:
//! - HTTP transport and wire DTOs for the REST API
//! - Repository interfaces with HTTP and in-memory mock implementations
//! - Use cases and observable stores per feature (inventory, picking,
//!   stock in, stock out, auth)
//! - A container that wires them for the configured data source
//!
//! Domain rules live in the `wareflow-*` domain crates; this crate only
//! moves data and keeps UI state.

pub mod config;
pub mod container;
pub mod dto;
pub mod error;
pub mod http;
pub mod mock;
pub mod repository;
pub mod store;
pub mod usecase;

pub use config::{ClientConfig, DataSource};
pub use container::{Container, Repositories};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use store::{
    AuthStore, DetailState, DetailStore, InventoryStore, ListSource, ListState, ListStore,
    OpenOrder, PickingStore, StockInStore, StockOutStore,
};
