//! Wire shapes of the backend API.
//!
//! Ids and statuses travel as strings; they are parsed (and rejected when
//! unknown) on the way into the domain via `TryFrom`. The reverse `From`
//! conversions are what mock backends and tests serve.

pub mod auth;
pub mod inventory;
pub mod picking;
pub mod stock_in;
pub mod stock_out;

use serde::{Deserialize, Serialize};

use wareflow_core::{DomainError, DomainResult, Page, PageRequest};

pub use auth::{LoginResponse, UserProfileDto};
pub use inventory::{CountUpdate, InventoryLineDto, InventoryRecordDto};
pub use picking::{PickUpdate, PickingOrderDto, ProcessItemDto};
pub use stock_in::{ReceiveUpdate, StockInDto, StockInLineDto};
pub use stock_out::{StockOutDto, StockOutLineDto};

/// List envelope: total row count plus the rows of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub count: u64,
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Convert every row, failing on the first one that does not parse.
    pub fn into_page<E>(self, request: PageRequest) -> DomainResult<Page<E>>
    where
        E: TryFrom<T, Error = DomainError>,
    {
        let results = self
            .results
            .into_iter()
            .map(E::try_from)
            .collect::<DomainResult<Vec<E>>>()?;
        Ok(Page::new(results, self.count, request))
    }

    pub fn from_page<E>(page: &Page<E>) -> Self
    where
        for<'a> T: From<&'a E>,
    {
        Self {
            count: page.count,
            results: page.results.iter().map(T::from).collect(),
        }
    }
}

/// Body of every `PATCH .../status` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

impl StatusUpdate {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

pub(crate) fn non_negative(field: &str, value: i64) -> DomainResult<i64> {
    if value < 0 {
        return Err(DomainError::validation(format!("{field} cannot be negative, got {value}")));
    }
    Ok(value)
}
