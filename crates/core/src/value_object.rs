//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Two value objects with the same attribute values are the same value
/// (e.g. two `StorageLocation`s naming the same shelf slot). They are never
/// mutated in place; build a new one instead.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
