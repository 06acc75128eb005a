//! Calendar/meeting consistency audit.
//!
//! Calendars and meetings reference each other only by id. These checks walk
//! both stores and report every place where the two sides disagree.

use slotbook_core::{MeetingId, MeetingStore, UserId, UserStore};
use thiserror::Error;

/// One broken link between a calendar and a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyFault {
    /// A calendar lists a meeting that is not in the meeting store.
    #[error("calendar of {owner} references missing meeting {meeting_id}")]
    DanglingReference {
        owner: UserId,
        meeting_id: MeetingId,
    },

    /// A calendar lists a meeting its owner neither hosts nor attends.
    #[error("calendar of {owner} references meeting {meeting_id} without attending it")]
    NotAttending {
        owner: UserId,
        meeting_id: MeetingId,
    },

    /// An attendee's calendar does not list the meeting.
    #[error("meeting {meeting_id} missing from calendar of {user_id}")]
    MissingReference {
        user_id: UserId,
        meeting_id: MeetingId,
    },

    /// A meeting names an attendee that is not registered.
    #[error("meeting {meeting_id} names unknown attendee {user_id}")]
    UnknownAttendee {
        user_id: UserId,
        meeting_id: MeetingId,
    },
}

/// Collects every fault across both stores. An empty result means consistent.
pub fn audit<U, M>(users: &U, meetings: &M) -> Vec<ConsistencyFault>
where
    U: UserStore + ?Sized,
    M: MeetingStore + ?Sized,
{
    let mut faults = Vec::new();

    for user in users.iter() {
        for meeting_id in user.calendar.meeting_ids() {
            match meetings.get(meeting_id) {
                None => faults.push(ConsistencyFault::DanglingReference {
                    owner: user.id.clone(),
                    meeting_id: meeting_id.clone(),
                }),
                Some(meeting) if !meeting.involves(&user.id) => {
                    faults.push(ConsistencyFault::NotAttending {
                        owner: user.id.clone(),
                        meeting_id: meeting_id.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    for meeting in meetings.iter() {
        for user_id in meeting.attendees() {
            match users.get(user_id) {
                None => faults.push(ConsistencyFault::UnknownAttendee {
                    user_id: user_id.clone(),
                    meeting_id: meeting.id.clone(),
                }),
                Some(user) if !user.calendar.contains(&meeting.id) => {
                    faults.push(ConsistencyFault::MissingReference {
                        user_id: user_id.clone(),
                        meeting_id: meeting.id.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    faults
}
