//! Inventory count module.
//!
//! An inventory record is a stock-take of one warehouse: a list of lines with
//! the quantity the system expects and the quantity an operator counted.
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod filter;
pub mod record;

pub use filter::InventoryFilter;
pub use record::{
    InventoryLine, InventoryLineId, InventoryRecord, InventoryRecordId, InventoryStatus,
    NewInventoryLine, NewInventoryRecord,
};
