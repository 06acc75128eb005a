//! Scheduling engine: availability checks, meeting lifecycle, shared access.
//!
//! This crate provides the component that decides whether a slot is free and
//! keeps user calendars and the meeting store consistent:
//! - [`SchedulingEngine`] for single-owner use
//! - [`SharedEngine`] to serialize scheduling across tasks
//! - [`EngineConfig`] for policy and logging settings loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use slotbook_core::UserId;
//! use slotbook_engine::SchedulingEngine;
//!
//! let mut engine = SchedulingEngine::in_memory();
//! engine.register_user("u1", "Ada", "ada@example.com")?;
//! engine.register_user("u2", "Grace", "grace@example.com")?;
//!
//! let meeting = engine.schedule_meeting(
//!     "Project Discussion",
//!     Utc.with_ymd_and_hms(2025, 9, 29, 14, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 9, 29, 15, 0, 0).unwrap(),
//!     &[UserId::from("u2")],
//!     &UserId::from("u1"),
//! )?;
//! assert_eq!(meeting.participant_ids, vec![UserId::from("u2")]);
//!
//! assert!(engine.cancel_meeting(&UserId::from("u1"), &meeting.id)?);
//! # Ok::<(), slotbook_engine::SchedulingError>(())
//! ```

mod config;
mod consistency;
mod engine;
mod error;
mod shared;

pub use config::{
    EngineConfig, LogFormat, LoggingSettings, SchedulingSettings, UnknownParticipantPolicy,
};
pub use consistency::ConsistencyFault;
pub use engine::SchedulingEngine;
pub use error::{ConfigError, SchedulingError, SchedulingResult};
pub use shared::SharedEngine;
