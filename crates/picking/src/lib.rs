//! Picking module.
//!
//! A picking order asks an operator to collect goods from storage locations.
//! The order's process items bind each product to a location; grouping them
//! by location gives the operator a walking route and a progress figure.
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod filter;
pub mod location;
pub mod order;
pub mod process;

pub use filter::PickingFilter;
pub use location::{
    LocationGroup, OrderProgress, PickingSummary, ensure_complete, group_by_location,
    order_progress, summarize,
};
pub use order::{
    NewPickingOrder, NewPickingOrderLine, PickingOrder, PickingOrderId, PickingOrderLine,
    PickingPriority, PickingStatus,
};
pub use process::{PickItemId, PickItemStatus, PickingOrderProcessItem};
