//! Time slots for meetings.
//!
//! This module provides [`TimeSlot`], a half-open interval `[start, end)` in
//! UTC, and the [`overlaps`] check that every availability decision is built
//! on.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a slot cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidSlot {
    /// `start` is not strictly before `end`.
    #[error("invalid time slot: start {start} is not before end {end}")]
    NotOrdered {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The end instant is not representable.
    #[error("invalid time slot: {start} plus {duration} is out of range")]
    OutOfRange {
        start: DateTime<Utc>,
        duration: Duration,
    },
}

/// A meeting time slot.
///
/// Represents a half-open interval `[start, end)` in UTC with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawSlot> for TimeSlot {
    type Error = InvalidSlot;

    fn try_from(raw: RawSlot) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeSlot {
    /// Creates a new time slot.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSlot::NotOrdered`] if `start` is not strictly
    /// before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidSlot> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidSlot::NotOrdered { start, end })
        }
    }

    /// Creates a slot from a start time and duration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSlot::OutOfRange`] if the end overflows, or
    /// [`InvalidSlot::NotOrdered`] if the duration is not positive.
    pub fn from_duration(start: DateTime<Utc>, duration: Duration) -> Result<Self, InvalidSlot> {
        let end = start
            .checked_add_signed(duration)
            .ok_or(InvalidSlot::OutOfRange { start, duration })?;
        Self::new(start, end)
    }

    /// Start of the slot (inclusive).
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the slot (exclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the duration of this slot.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if an instant falls within this slot.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if this slot overlaps another.
    ///
    /// Slots that only touch (one ends exactly when the other starts) do not
    /// overlap, so back-to-back meetings are allowed.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        overlaps(self, other)
    }
}

/// Returns true iff the two half-open slots intersect.
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.start < b.end && b.start < a.end
}
