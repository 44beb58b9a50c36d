//! Stock-in (inbound receipt) module.
//!
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod receipt;

pub use receipt::{
    NewStockIn, NewStockInLine, StockIn, StockInFilter, StockInId, StockInLine, StockInLineId,
    StockInStatus,
};
