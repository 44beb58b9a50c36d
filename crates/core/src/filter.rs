//! Helpers shared by list filters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date range (UTC). Open on a side when that bound is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Case-insensitive substring search over a set of fields.
///
/// A missing or blank needle matches everything.
pub fn matches_text(haystacks: &[&str], needle: Option<&str>) -> bool {
    let needle = match needle.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_lowercase(),
        _ => return true,
    };
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

/// Exact (case-insensitive) match against an optional expected value.
pub fn matches_exact(value: &str, expected: Option<&str>) -> bool {
    match expected.map(str::trim) {
        Some(e) if !e.is_empty() => value.trim().eq_ignore_ascii_case(e),
        _ => true,
    }
}
