//! Identifier newtypes for users and meetings.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier of a user.
    UserId
);

string_id!(
    /// Unique identifier of a meeting.
    MeetingId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_conversions() {
        let id = UserId::from("u-1");
        assert_eq!(id.to_string(), "u-1");
        assert_eq!(id.as_str(), "u-1");
        assert_eq!(id, UserId::new(String::from("u-1")));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = MeetingId::from("m-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""m-42""#);
        let parsed: MeetingId = serde_json::from_str(r#""m-42""#).unwrap();
        assert_eq!(parsed, id);
    }
}
