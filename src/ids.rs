/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! Opaque 128-bit identifiers for the core entities (§3).
//!
//! Each wraps a `Uuid` rather than exposing one directly so the three id
//! spaces (order, trade, trader) can't be mixed up at a call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh, random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an externally supplied UUID (e.g. one a caller pre-assigned).
            #[must_use]
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_id!(OrderId, "Identifies a single order, unique for its lifetime.");
uuid_id!(TradeId, "Identifies a single emitted trade.");
uuid_id!(TraderId, "Identifies the trader that owns an order.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_ids_are_not_equal() {
        assert_ne!(OrderId::new(), OrderId::new());
    }

    #[test]
    fn roundtrips_through_display_and_uuid() {
        let id = OrderId::new();
        let printed = id.to_string();
        assert_eq!(printed, id.as_uuid().to_string());
    }

    #[test]
    fn wraps_a_caller_supplied_uuid() {
        let raw = Uuid::new_v4();
        let id = OrderId::from_uuid(raw);
        assert_eq!(id.as_uuid(), raw);
    }
}
