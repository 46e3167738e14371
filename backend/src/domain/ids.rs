//! Strongly typed identifiers for rides and the parties involved in them.
//!
//! Every identifier is a UUID rendered in its hyphenated form on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    Empty { kind: &'static str },
    Invalid { kind: &'static str },
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} id must not be empty"),
            Self::Invalid { kind } => write!(f, "{kind} id must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its textual form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                if raw.trim() != raw {
                    return Err(IdValidationError::Invalid { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdValidationError::Invalid { kind: $kind })
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of a ride request.
    RideId,
    "ride"
);
uuid_identifier!(
    /// Identifier of a chair (driver).
    ChairId,
    "chair"
);
uuid_identifier!(
    /// Identifier of a rider account.
    RiderId,
    "rider"
);
uuid_identifier!(
    /// Identifier of a chair owner account.
    OwnerId,
    "owner"
);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", IdValidationError::Empty { kind: "ride" })]
    #[case("not-a-uuid", IdValidationError::Invalid { kind: "ride" })]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", IdValidationError::Invalid { kind: "ride" })]
    fn rejects_malformed_ride_ids(#[case] raw: &str, #[case] expected: IdValidationError) {
        assert_eq!(RideId::new(raw), Err(expected));
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = ChairId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, serde_json::json!("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
        let back: ChairId = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, id);
    }
}
