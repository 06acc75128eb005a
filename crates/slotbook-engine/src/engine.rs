//! The scheduling engine.
//!
//! [`SchedulingEngine`] is the only component that mutates calendars and the
//! meeting store, and it keeps the two consistent:
//! - every id in a calendar resolves to a stored meeting its owner attends
//! - every stored meeting's host and participants list it in their calendar
//!
//! Each operation validates fully before its first write, so a returned error
//! never leaves partial state behind.
//!
//! The host is a hard requirement: if their calendar conflicts the whole
//! request fails. Participants are soft: a busy participant is simply left out
//! and callers learn who was accepted from the returned [`Meeting`].

use chrono::{DateTime, Utc};
use slotbook_core::{
    InMemoryMeetingStore, InMemoryUserStore, Meeting, MeetingId, MeetingStore, TimeSlot, User,
    UserId, UserStore,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{EngineConfig, UnknownParticipantPolicy};
use crate::consistency::{self, ConsistencyFault};
use crate::error::{SchedulingError, SchedulingResult};

/// Schedules and cancels meetings across user calendars.
///
/// Stores are injected, so tests and alternative backends each get their own.
#[derive(Debug, Clone)]
pub struct SchedulingEngine<U = InMemoryUserStore, M = InMemoryMeetingStore> {
    users: U,
    meetings: M,
    config: EngineConfig,
}

impl SchedulingEngine {
    /// Creates an engine over fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(InMemoryUserStore::new(), InMemoryMeetingStore::new())
    }
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<U: UserStore, M: MeetingStore> SchedulingEngine<U, M> {
    /// Creates an engine over the given stores with default configuration.
    pub fn new(users: U, meetings: M) -> Self {
        Self {
            users,
            meetings,
            config: EngineConfig::default(),
        }
    }

    /// Builder: set the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registers a new user with an empty calendar.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Store`] if the id is already taken.
    pub fn register_user(
        &mut self,
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> SchedulingResult<&User> {
        let user = User::new(id, name, email);
        let id = user.id.clone();
        self.users.add(user)?;
        debug!(user_id = %id, "Registered user");
        self.users.get(&id).ok_or(SchedulingError::UnknownUser(id))
    }

    /// Schedules a meeting hosted by `host_id`.
    ///
    /// Candidates are considered in order. The host and repeated ids are
    /// ignored, unknown ids follow the configured
    /// [`UnknownParticipantPolicy`], and busy candidates are dropped.
    ///
    /// # Errors
    ///
    /// - [`SchedulingError::InvalidInterval`] if `start >= end`
    /// - [`SchedulingError::UnknownUser`] if the host is not registered, or a
    ///   candidate is not and the policy is `Reject`
    /// - [`SchedulingError::HostUnavailable`] if the host's calendar conflicts
    /// - [`SchedulingError::Store`] if the meeting store rejects the new id
    pub fn schedule_meeting(
        &mut self,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        participant_ids: &[UserId],
        host_id: &UserId,
    ) -> SchedulingResult<Meeting> {
        let slot = TimeSlot::new(start, end).map_err(|e| {
            warn!(%start, %end, "Rejected meeting with invalid interval");
            SchedulingError::from(e)
        })?;

        let host = self
            .users
            .get(host_id)
            .ok_or_else(|| SchedulingError::UnknownUser(host_id.clone()))?;

        let conflicts = host.calendar.conflicts(&slot, &self.meetings);
        if !conflicts.is_empty() {
            warn!(host = %host_id, conflicts = conflicts.len(), "Host is not available");
            return Err(SchedulingError::HostUnavailable {
                host_id: host_id.clone(),
                conflicts,
            });
        }

        let accepted = self.accepted_participants(&slot, participant_ids, host_id)?;

        let meeting = Meeting::new(new_meeting_id(), title, slot, host_id.clone())
            .with_participants(accepted);
        self.meetings.add(meeting.clone())?;

        for user_id in meeting.attendees() {
            if let Some(user) = self.users.get_mut(user_id) {
                user.calendar.add_meeting(meeting.id.clone());
            }
        }

        info!(
            meeting_id = %meeting.id,
            host = %meeting.host_id,
            requested = participant_ids.len(),
            accepted = meeting.participant_ids.len(),
            "Scheduled meeting"
        );
        Ok(meeting)
    }

    /// Cancels a meeting on behalf of `user_id`.
    ///
    /// Returns `Ok(false)` if there is no such meeting, so cancelling twice is
    /// harmless. Attendees that are no longer registered are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::NotHost`] if `user_id` is not the host.
    pub fn cancel_meeting(
        &mut self,
        user_id: &UserId,
        meeting_id: &MeetingId,
    ) -> SchedulingResult<bool> {
        let Some(meeting) = self.meetings.get(meeting_id) else {
            debug!(meeting_id = %meeting_id, "Nothing to cancel");
            return Ok(false);
        };

        if !meeting.is_host(user_id) {
            warn!(meeting_id = %meeting_id, user = %user_id, "Cancellation by non-host refused");
            return Err(SchedulingError::not_host(user_id.clone(), meeting_id.clone()));
        }

        let attendees: Vec<UserId> = meeting.attendees().cloned().collect();
        for attendee in &attendees {
            match self.users.get_mut(attendee) {
                Some(user) => {
                    user.calendar.remove_meeting(meeting_id);
                }
                None => debug!(user = %attendee, "Skipping unknown attendee"),
            }
        }
        self.meetings.remove(meeting_id);

        info!(meeting_id = %meeting_id, attendees = attendees.len(), "Cancelled meeting");
        Ok(true)
    }

    /// Looks up a meeting by id.
    pub fn get_meeting(&self, id: &MeetingId) -> Option<&Meeting> {
        self.meetings.get(id)
    }

    /// Looks up a user by id.
    pub fn get_user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Meeting ids in the user's calendar, or `None` for an unknown user.
    pub fn user_calendar_meeting_ids(&self, user_id: &UserId) -> Option<&[MeetingId]> {
        self.users.get(user_id).map(|u| u.calendar.meeting_ids())
    }

    /// Returns true if the user's calendar is free for `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::InvalidInterval`] or
    /// [`SchedulingError::UnknownUser`].
    pub fn is_available(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<bool> {
        let slot = TimeSlot::new(start, end)?;
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| SchedulingError::UnknownUser(user_id.clone()))?;
        Ok(user.calendar.can_schedule(&slot, &self.meetings))
    }

    /// The user's meetings, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::UnknownUser`] for an unknown user.
    pub fn meetings_for_user(&self, user_id: &UserId) -> SchedulingResult<Vec<&Meeting>> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| SchedulingError::UnknownUser(user_id.clone()))?;
        let mut meetings: Vec<&Meeting> = user
            .calendar
            .meeting_ids()
            .iter()
            .filter_map(|id| self.meetings.get(id))
            .collect();
        meetings.sort_by(|a, b| {
            a.slot
                .start()
                .cmp(&b.slot.start())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(meetings)
    }

    /// Verifies that calendars and meetings agree with each other.
    ///
    /// # Errors
    ///
    /// Returns every fault found.
    pub fn check_consistency(&self) -> Result<(), Vec<ConsistencyFault>> {
        let faults = consistency::audit(&self.users, &self.meetings);
        if faults.is_empty() {
            Ok(())
        } else {
            Err(faults)
        }
    }

    /// Read access to the user store.
    pub fn users(&self) -> &U {
        &self.users
    }

    /// Read access to the meeting store.
    pub fn meetings(&self) -> &M {
        &self.meetings
    }

    fn accepted_participants(
        &self,
        slot: &TimeSlot,
        candidates: &[UserId],
        host_id: &UserId,
    ) -> SchedulingResult<Vec<UserId>> {
        let mut accepted: Vec<UserId> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if candidate == host_id || accepted.contains(candidate) {
                continue;
            }

            let Some(user) = self.users.get(candidate) else {
                match self.config.scheduling.unknown_participants {
                    UnknownParticipantPolicy::Skip => {
                        debug!(participant = %candidate, "Skipping unknown participant");
                        continue;
                    }
                    UnknownParticipantPolicy::Reject => {
                        warn!(participant = %candidate, "Rejected unknown participant");
                        return Err(SchedulingError::UnknownUser(candidate.clone()));
                    }
                }
            };

            if user.calendar.can_schedule(slot, &self.meetings) {
                accepted.push(candidate.clone());
            } else {
                debug!(participant = %candidate, "Participant busy, leaving out");
            }
        }

        Ok(accepted)
    }
}

fn new_meeting_id() -> MeetingId {
    MeetingId::from(Uuid::new_v4().to_string())
}
