//! `wareflow-core` — shared building blocks for the warehouse client.
//!
//! This crate contains **pure domain** primitives (no IO): identifiers, the
//! domain error, pagination, status lifecycles, storage locations and
//! quantity helpers.

pub mod entity;
pub mod error;
pub mod filter;
pub mod id;
pub mod location;
pub mod page;
pub mod quantity;
pub mod status;
pub mod value_object;

pub use entity::{Entity, Timestamped};
pub use error::{DomainError, DomainResult};
pub use filter::{DateRange, matches_exact, matches_text};
pub use id::{EntityId, UserId};
pub use location::StorageLocation;
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use quantity::{Quantified, ratio, total_quantity};
pub use status::Lifecycle;
pub use value_object::ValueObject;
