//! Store error types.

use thiserror::Error;

use crate::ids::{MeetingId, UserId};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when writing to a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A meeting with this id is already stored.
    #[error("meeting already exists: {0}")]
    DuplicateMeeting(MeetingId),

    /// A user with this id is already registered.
    #[error("user already exists: {0}")]
    DuplicateUser(UserId),
}
