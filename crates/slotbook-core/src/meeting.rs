//! Meeting records.

use serde::{Deserialize, Serialize};

use crate::ids::{MeetingId, UserId};
use crate::time::TimeSlot;

/// A scheduled meeting.
///
/// The host is not listed in `participant_ids` but always attends.
/// Participants are the accepted ones, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique identifier for the meeting.
    pub id: MeetingId,
    /// The meeting title.
    pub title: String,
    /// When the meeting takes place.
    pub slot: TimeSlot,
    /// The user who created the meeting and may cancel it.
    pub host_id: UserId,
    /// Accepted participants, excluding the host.
    pub participant_ids: Vec<UserId>,
}

impl Meeting {
    /// Creates a new meeting with no participants.
    pub fn new(
        id: impl Into<MeetingId>,
        title: impl Into<String>,
        slot: TimeSlot,
        host_id: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slot,
            host_id: host_id.into(),
            participant_ids: Vec::new(),
        }
    }

    /// Builder method to set participants.
    pub fn with_participants(mut self, participant_ids: Vec<UserId>) -> Self {
        self.participant_ids = participant_ids;
        self
    }

    /// Returns true if the user hosts this meeting.
    pub fn is_host(&self, user_id: &UserId) -> bool {
        &self.host_id == user_id
    }

    /// Returns true if the user attends, as host or accepted participant.
    pub fn involves(&self, user_id: &UserId) -> bool {
        self.is_host(user_id) || self.participant_ids.contains(user_id)
    }

    /// Returns the host followed by every participant.
    pub fn attendees(&self) -> impl Iterator<Item = &UserId> {
        std::iter::once(&self.host_id).chain(self.participant_ids.iter())
    }
}
