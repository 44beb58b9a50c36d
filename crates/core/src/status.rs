//! Status lifecycles.
//!
//! Every record type carries a status drawn from a fixed string-enum set. The
//! allowed moves between statuses are declared as a successor table; the
//! client checks it before issuing a status-update call, and mock backends
//! enforce it the same way the real backend does.

use crate::error::{DomainError, DomainResult};

/// A status enum with a fixed wire vocabulary and a transition table.
pub trait Lifecycle: Copy + Eq + core::fmt::Debug + 'static {
    /// Every status, in declaration order.
    const ALL: &'static [Self];

    /// Wire form (`snake_case`).
    fn as_str(&self) -> &'static str;

    /// Statuses reachable in one step.
    fn successors(&self) -> &'static [Self];

    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    fn can_transition_to(&self, next: Self) -> bool {
        self.successors().contains(&next)
    }

    fn check_transition(&self, next: Self) -> DomainResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::transition(self.as_str(), next.as_str()))
        }
    }

    /// Parse the wire form (case-insensitive, surrounding whitespace ignored).
    fn parse(s: &str) -> DomainResult<Self> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                DomainError::validation(format!(
                    "unknown status '{needle}' (expected one of: {})",
                    allowed.join(", ")
                ))
            })
    }
}

/// Implement `Display` and `FromStr` for a [`Lifecycle`] enum.
#[macro_export]
macro_rules! impl_lifecycle_text {
    ($t:ty) => {
        impl ::core::fmt::Display for $t {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::Lifecycle::as_str(self))
            }
        }

        impl ::core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$t as $crate::Lifecycle>::parse(s)
            }
        }
    };
}
