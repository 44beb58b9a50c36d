//! Stock-out (outbound shipment) module.
//!
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod shipment;

pub use shipment::{
    NewStockOut, NewStockOutLine, StockOut, StockOutFilter, StockOutId, StockOutLine,
    StockOutLineId, StockOutStatus,
};
