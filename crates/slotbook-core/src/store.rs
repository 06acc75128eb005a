//! Keyed stores for meetings and users.
//!
//! [`MeetingStore`] and [`UserStore`] are the storage seams of the scheduling
//! engine. The in-memory implementations here back the default engine; any
//! other backend works as long as it honours the same contract:
//! - ids are unique, and `add` rejects a duplicate instead of overwriting
//! - `get` / `remove` on an unknown id are plain misses, never errors
//!
//! Stores hold no business logic. Keeping calendars and meetings consistent
//! with each other is the engine's job.

use std::collections::HashMap;

use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::ids::{MeetingId, UserId};
use crate::meeting::Meeting;
use crate::user::User;

/// Storage for meeting records, keyed by [`MeetingId`].
pub trait MeetingStore {
    /// Stores a new meeting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateMeeting`] if the id is already present.
    fn add(&mut self, meeting: Meeting) -> StoreResult<()>;

    /// Looks up a meeting by id.
    fn get(&self, id: &MeetingId) -> Option<&Meeting>;

    /// Removes a meeting, returning whether it was present.
    fn remove(&mut self, id: &MeetingId) -> bool;

    /// Iterates over every stored meeting, in no particular order.
    fn iter(&self) -> Box<dyn Iterator<Item = &Meeting> + '_>;

    /// Returns the number of stored meetings.
    fn len(&self) -> usize;

    /// Returns true if the meeting is stored.
    fn contains(&self, id: &MeetingId) -> bool {
        self.get(id).is_some()
    }

    /// Returns true if no meetings are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Storage for users and their calendars, keyed by [`UserId`].
pub trait UserStore {
    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateUser`] if the id is already present.
    fn add(&mut self, user: User) -> StoreResult<()>;

    /// Looks up a user by id.
    fn get(&self, id: &UserId) -> Option<&User>;

    /// Looks up a user by id for mutation of their calendar.
    fn get_mut(&mut self, id: &UserId) -> Option<&mut User>;

    /// Iterates over every registered user, in no particular order.
    fn iter(&self) -> Box<dyn Iterator<Item = &User> + '_>;

    /// Returns the number of registered users.
    fn len(&self) -> usize;

    /// Returns true if the user is registered.
    fn contains(&self, id: &UserId) -> bool {
        self.get(id).is_some()
    }

    /// Returns true if no users are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `HashMap`-backed [`MeetingStore`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryMeetingStore {
    meetings: HashMap<MeetingId, Meeting>,
}

impl InMemoryMeetingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeetingStore for InMemoryMeetingStore {
    fn add(&mut self, meeting: Meeting) -> StoreResult<()> {
        if self.meetings.contains_key(&meeting.id) {
            return Err(StoreError::DuplicateMeeting(meeting.id));
        }
        trace!(meeting_id = %meeting.id, "Stored meeting");
        self.meetings.insert(meeting.id.clone(), meeting);
        Ok(())
    }

    fn get(&self, id: &MeetingId) -> Option<&Meeting> {
        self.meetings.get(id)
    }

    fn remove(&mut self, id: &MeetingId) -> bool {
        let removed = self.meetings.remove(id).is_some();
        if removed {
            trace!(meeting_id = %id, "Removed meeting");
        }
        removed
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Meeting> + '_> {
        Box::new(self.meetings.values())
    }

    fn len(&self) -> usize {
        self.meetings.len()
    }
}

/// `HashMap`-backed [`UserStore`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: HashMap<UserId, User>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn add(&mut self, user: User) -> StoreResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(StoreError::DuplicateUser(user.id));
        }
        trace!(user_id = %user.id, "Registered user");
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    fn get_mut(&mut self, id: &UserId) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &User> + '_> {
        Box::new(self.users.values())
    }

    fn len(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeSlot;
    use chrono::{TimeZone, Utc};

    fn meeting(id: &str) -> Meeting {
        let slot = TimeSlot::new(
            Utc.with_ymd_and_hms(2025, 9, 29, 14, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 29, 15, 0, 0).unwrap(),
        )
        .unwrap();
        Meeting::new(id, "Sync", slot, "host")
    }

    #[test]
    fn meeting_add_get_remove() {
        let mut store = InMemoryMeetingStore::new();
        assert!(store.is_empty());

        store.add(meeting("m-1")).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains(&MeetingId::from("m-1")));
        assert_eq!(store.get(&MeetingId::from("m-1")).unwrap().title, "Sync");
        assert!(store.get(&MeetingId::from("m-2")).is_none());

        assert!(store.remove(&MeetingId::from("m-1")));
        assert!(!store.remove(&MeetingId::from("m-1")));
        assert!(store.is_empty());
    }

    #[test]
    fn meeting_duplicate_rejected() {
        let mut store = InMemoryMeetingStore::new();
        store.add(meeting("m-1")).unwrap();

        let mut other = meeting("m-1");
        other.title = "Other".to_string();
        let err = store.add(other).unwrap_err();
        assert_eq!(err, StoreError::DuplicateMeeting(MeetingId::from("m-1")));

        // Original record untouched
        assert_eq!(store.get(&MeetingId::from("m-1")).unwrap().title, "Sync");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn user_add_and_lookup() {
        let mut store = InMemoryUserStore::new();
        let ada = User::new("u-1", "Ada", "ada@example.com");
        store.add(ada).unwrap();

        assert!(store.contains(&UserId::from("u-1")));
        assert_eq!(store.get(&UserId::from("u-1")).unwrap().name, "Ada");
        assert!(store.get(&UserId::from("u-2")).is_none());

        let user = store.get_mut(&UserId::from("u-1")).unwrap();
        user.calendar.add_meeting(MeetingId::from("m-1"));
        assert_eq!(store.get(&UserId::from("u-1")).unwrap().calendar.len(), 1);
    }

    #[test]
    fn user_duplicate_rejected() {
        let mut store = InMemoryUserStore::new();
        store.add(User::new("u-1", "Ada", "ada@example.com")).unwrap();
        let err = store
            .add(User::new("u-1", "Impostor", "x@example.com"))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateUser(UserId::from("u-1")));
        assert_eq!(store.get(&UserId::from("u-1")).unwrap().name, "Ada");
        assert_eq!(store.iter().count(), 1);
    }
}
