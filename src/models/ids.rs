//! Strongly-typed ID wrappers for budgets, lines and transactions
//!
//! Newtype wrappers keep a `BudgetLineId` from being passed where a
//! `TransactionId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Check a user-typed reference against this ID
            ///
            /// Accepts the full UUID or the short display form
            /// (e.g. `line-1a2b3c4d`), with or without the prefix.
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim();
                let reference = reference.strip_prefix($display_prefix).unwrap_or(reference);
                if reference.len() < 8 {
                    return false;
                }
                self.0.to_string().starts_with(&reference.to_ascii_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(BudgetId, "bud-");
define_id!(BudgetLineId, "line-");
define_id!(TransactionId, "txn-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = BudgetLineId::new();
        let display = id.to_string();
        assert!(display.starts_with("line-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain = TransactionId::parse(uuid_str).unwrap();
        let prefixed: TransactionId = format!("txn-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_form() {
        let id = BudgetLineId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches("line-550e8400"));
        assert!(id.matches("550E8400"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("550e"));
        assert!(!id.matches("line-00000000"));
    }

    #[test]
    fn test_id_serialization() {
        let id = BudgetId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: BudgetId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
