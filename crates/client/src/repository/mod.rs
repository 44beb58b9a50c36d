//! Repository interfaces, one per feature, and their HTTP implementations.
//!
//! Mock implementations live in [`crate::mock`].

pub mod auth;
pub mod inventory;
pub mod picking;
pub mod stock_in;
pub mod stock_out;

use wareflow_core::DomainResult;

use crate::error::{ClientError, ClientResult};

pub use auth::{AuthRepository, HttpAuthRepository};
pub use inventory::{HttpInventoryRepository, InventoryRepository};
pub use picking::{HttpPickingRepository, PickingRepository};
pub use stock_in::{HttpStockInRepository, StockInRepository};
pub use stock_out::{HttpStockOutRepository, StockOutRepository};

/// A backend payload that parsed as JSON but not as a valid entity is a
/// decode failure, not a caller mistake.
pub(crate) fn decoded<T>(result: DomainResult<T>) -> ClientResult<T> {
    result.map_err(|e| ClientError::decode(e.to_string()))
}
