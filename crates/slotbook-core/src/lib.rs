//! Core types: time slots, ids, users, meetings, calendars, stores

pub mod calendar;
pub mod error;
pub mod ids;
pub mod meeting;
pub mod store;
pub mod time;
pub mod tracing;
pub mod user;

pub use calendar::Calendar;
pub use error::{StoreError, StoreResult};
pub use ids::{MeetingId, UserId};
pub use meeting::Meeting;
pub use store::{InMemoryMeetingStore, InMemoryUserStore, MeetingStore, UserStore};
pub use time::{InvalidSlot, TimeSlot, overlaps};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use user::User;
