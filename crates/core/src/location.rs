//! Storage locations inside a warehouse.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Separator used when concatenating location fields into a key.
pub const LOCATION_KEY_SEPARATOR: char = '-';

/// A slot in the warehouse, from coarse to fine.
///
/// Ordering is field-by-field, which is also the order a picker walks the
/// floor (warehouse, then area, then row...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct StorageLocation {
    pub warehouse: String,
    pub area: String,
    pub row: String,
    pub shelf: String,
    pub level: String,
    pub position: String,
}

impl ValueObject for StorageLocation {}

impl StorageLocation {
    pub fn new(
        warehouse: impl Into<String>,
        area: impl Into<String>,
        row: impl Into<String>,
        shelf: impl Into<String>,
        level: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            warehouse: warehouse.into(),
            area: area.into(),
            row: row.into(),
            shelf: shelf.into(),
            level: level.into(),
            position: position.into(),
        }
    }

    /// Grouping key: all six fields joined with `-` (blank fields stay as
    /// empty segments so the key is positional).
    pub fn key(&self) -> String {
        let mut key = String::with_capacity(32);
        for (i, part) in self.parts().iter().enumerate() {
            if i > 0 {
                key.push(LOCATION_KEY_SEPARATOR);
            }
            key.push_str(part.trim());
        }
        key
    }

    pub fn parts(&self) -> [&str; 6] {
        [
            &self.warehouse,
            &self.area,
            &self.row,
            &self.shelf,
            &self.level,
            &self.position,
        ]
    }

    pub fn is_blank(&self) -> bool {
        self.parts().iter().all(|p| p.trim().is_empty())
    }
}

impl core::fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.key())
    }
}
