//! Identifier types with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A weekday index outside 0..=6.
    #[error("weekday index must be between 0 and 6, got {value}")]
    WeekdayOutOfRange { value: i64 },

    /// A weekday name that could not be parsed.
    #[error("invalid weekday: {value}")]
    InvalidWeekday { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Generates a store-assigned integer ID newtype.
macro_rules! define_row_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_row_id!(
    /// Identifier of an employee record.
    EmployeeId
);

define_row_id!(
    /// Identifier of an attendance session record.
    SessionId
);

define_string_id!(
    /// The code printed on an employee's badge and scanned at the kiosk.
    ///
    /// Badge codes must be non-empty. Uniqueness is enforced by the store.
    BadgeCode, "badge code"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_code_rejects_empty() {
        assert!(BadgeCode::new("").is_err());
        assert!(BadgeCode::new("   ").is_err());
        assert!(BadgeCode::new("a1b2").is_ok());
    }

    #[test]
    fn badge_code_serde_rejects_empty() {
        let result: Result<BadgeCode, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn row_ids_serialize_as_plain_integers() {
        let id = EmployeeId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(SessionId::from(7).get(), 7);
    }

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::WeekdayOutOfRange { value: 9 };
        assert_eq!(err.to_string(), "weekday index must be between 0 and 6, got 9");
    }
}
