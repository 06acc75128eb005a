//! Per-user calendars.
//!
//! A [`Calendar`] holds back-references (ids) to every meeting its owner is
//! committed to, as host or accepted participant. It never owns meeting
//! data: availability checks resolve each id through a [`MeetingStore`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ids::{MeetingId, UserId};
use crate::store::MeetingStore;
use crate::time::TimeSlot;

/// The set of meetings one user has committed to.
///
/// Ids are kept in insertion order with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCalendar")]
pub struct Calendar {
    /// The user owning this calendar.
    pub owner_id: UserId,
    meeting_ids: Vec<MeetingId>,
}

#[derive(Deserialize)]
struct RawCalendar {
    owner_id: UserId,
    #[serde(default)]
    meeting_ids: Vec<MeetingId>,
}

// Repeated ids collapse to their first occurrence.
impl From<RawCalendar> for Calendar {
    fn from(raw: RawCalendar) -> Self {
        let mut calendar = Calendar::new(raw.owner_id);
        for id in raw.meeting_ids {
            calendar.add_meeting(id);
        }
        calendar
    }
}

impl Calendar {
    /// Creates an empty calendar for the given owner.
    pub fn new(owner_id: impl Into<UserId>) -> Self {
        Self {
            owner_id: owner_id.into(),
            meeting_ids: Vec::new(),
        }
    }

    /// Returns true if no referenced meeting overlaps `slot`.
    ///
    /// Ids that no longer resolve in `meetings` are skipped.
    pub fn can_schedule<M: MeetingStore + ?Sized>(&self, slot: &TimeSlot, meetings: &M) -> bool {
        !self
            .resolved(meetings)
            .any(|(_, meeting_slot)| meeting_slot.overlaps(slot))
    }

    /// Returns the ids of referenced meetings that overlap `slot`.
    pub fn conflicts<M: MeetingStore + ?Sized>(
        &self,
        slot: &TimeSlot,
        meetings: &M,
    ) -> Vec<MeetingId> {
        self.resolved(meetings)
            .filter(|(_, meeting_slot)| meeting_slot.overlaps(slot))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Adds a meeting reference. Returns false if it was already present.
    pub fn add_meeting(&mut self, id: MeetingId) -> bool {
        if self.meeting_ids.contains(&id) {
            return false;
        }
        self.meeting_ids.push(id);
        true
    }

    /// Removes a meeting reference. Returns false if it was not present.
    pub fn remove_meeting(&mut self, id: &MeetingId) -> bool {
        let before = self.meeting_ids.len();
        self.meeting_ids.retain(|m| m != id);
        before != self.meeting_ids.len()
    }

    /// Returns true if the calendar references the meeting.
    pub fn contains(&self, id: &MeetingId) -> bool {
        self.meeting_ids.contains(id)
    }

    /// Referenced meeting ids in insertion order.
    pub fn meeting_ids(&self) -> &[MeetingId] {
        &self.meeting_ids
    }

    pub fn len(&self) -> usize {
        self.meeting_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meeting_ids.is_empty()
    }

    fn resolved<'a, M: MeetingStore + ?Sized>(
        &'a self,
        meetings: &'a M,
    ) -> impl Iterator<Item = (&'a MeetingId, TimeSlot)> + 'a {
        self.meeting_ids.iter().filter_map(move |id| match meetings.get(id) {
            Some(meeting) => Some((id, meeting.slot)),
            None => {
                warn!(
                    owner = %self.owner_id,
                    meeting_id = %id,
                    "Calendar references unknown meeting"
                );
                None
            }
        })
    }
}
