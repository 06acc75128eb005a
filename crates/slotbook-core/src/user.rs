//! Users and their owned calendar.

use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::ids::UserId;

/// A user able to host or attend meetings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// The user's calendar, owned exclusively by them.
    pub calendar: Calendar,
}

impl User {
    /// Creates a user with an empty calendar.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            calendar: Calendar::new(id.clone()),
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_owned_by_user() {
        let user = User::new("u-1", "Ada", "ada@example.com");
        assert_eq!(user.calendar.owner_id, user.id);
        assert!(user.calendar.is_empty());
    }
}
