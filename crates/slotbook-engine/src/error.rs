//! Engine error types.

use std::io;

use chrono::{DateTime, Utc};
use slotbook_core::{InvalidSlot, MeetingId, StoreError, UserId};
use thiserror::Error;

/// Result type for scheduling operations.
pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Errors returned by the scheduling engine.
///
/// Every variant is produced before the engine touches a store or calendar,
/// so a failed call never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    /// The requested start is not before the requested end.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The host already has a meeting overlapping the requested slot.
    #[error("host {host_id} is not available ({} conflicting meeting(s))", .conflicts.len())]
    HostUnavailable {
        host_id: UserId,
        conflicts: Vec<MeetingId>,
    },

    /// Someone other than the host tried to cancel a meeting.
    #[error("user {user_id} is not the host of meeting {meeting_id}")]
    NotHost {
        user_id: UserId,
        meeting_id: MeetingId,
    },

    /// A referenced user is not registered.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// A slot could not be represented.
    #[error(transparent)]
    Slot(InvalidSlot),

    /// Store rejected a write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SchedulingError {
    /// Creates a not-host error.
    pub fn not_host(user_id: impl Into<UserId>, meeting_id: impl Into<MeetingId>) -> Self {
        Self::NotHost {
            user_id: user_id.into(),
            meeting_id: meeting_id.into(),
        }
    }
}

impl From<InvalidSlot> for SchedulingError {
    fn from(err: InvalidSlot) -> Self {
        match err {
            InvalidSlot::NotOrdered { start, end } => Self::InvalidInterval { start, end },
            other => Self::Slot(other),
        }
    }
}

/// Errors that can occur while loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid TOML or has unknown values.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not acceptable.
    #[error("invalid config value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    /// Creates an invalid-value error.
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn slot_errors_map_to_scheduling_errors() {
        let start = Utc.with_ymd_and_hms(2025, 9, 29, 14, 0, 0).unwrap();

        let not_ordered = InvalidSlot::NotOrdered { start, end: start };
        assert_eq!(
            SchedulingError::from(not_ordered),
            SchedulingError::InvalidInterval { start, end: start }
        );

        let out_of_range = InvalidSlot::OutOfRange {
            start,
            duration: Duration::MAX,
        };
        assert_eq!(
            SchedulingError::from(out_of_range),
            SchedulingError::Slot(out_of_range)
        );
    }
}
