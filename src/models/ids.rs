//! Strongly-typed ID wrappers for all entity types
//!
//! Identifiers are assigned by the store's auto-increment sequence (starting
//! at 1) and are immutable for the lifetime of a record. Newtype wrappers
//! prevent mixing up IDs from different entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw store identifier
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the underlying identifier value
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(IncomeId, "inc-");
define_id!(ExpenseId, "exp-");
define_id!(GoalId, "goal-");
