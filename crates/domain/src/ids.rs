use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Host document ids are short opaque strings, not UUIDs.
pub const MAX_ID_LENGTH: usize = 64;

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a validated id (non-empty after trimming, bounded length).
            pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(concat!($label, " cannot be empty")));
                }
                if trimmed.len() > MAX_ID_LENGTH {
                    return Err(DomainError::invalid_id(format!(
                        "{} cannot exceed {} characters",
                        $label, MAX_ID_LENGTH
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(ItemId, "Item id");
define_id!(ActorId, "Actor id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_trimmed() {
        let id = ItemId::new("  Ab1 ").unwrap();
        assert_eq!(id.as_str(), "Ab1");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(matches!(ItemId::new("   "), Err(DomainError::InvalidId(_))));
        assert!(matches!(ActorId::new(""), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn overlong_id_is_rejected() {
        let long = "x".repeat(MAX_ID_LENGTH + 1);
        assert!(ItemId::new(long).is_err());
    }

    #[test]
    fn serde_uses_plain_strings() {
        let id = ItemId::new("Ab2").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Ab2\"");

        let parsed: ItemId = serde_json::from_str("\"Ab3\"").unwrap();
        assert_eq!(parsed.as_str(), "Ab3");

        assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
    }
}
