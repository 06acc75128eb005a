//! Shared access to a scheduling engine.
//!
//! Scheduling is a read-check-then-write sequence: two requests that both see
//! a free slot must not both book it. [`SharedEngine`] serializes every
//! mutation behind one write lock held for the whole sequence, while reads
//! share the lock and return owned copies.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use slotbook_core::{
    InMemoryMeetingStore, InMemoryUserStore, Meeting, MeetingId, MeetingStore, User, UserId,
    UserStore,
};
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::consistency::ConsistencyFault;
use crate::engine::SchedulingEngine;
use crate::error::SchedulingResult;

/// A [`SchedulingEngine`] that can be cloned across tasks.
#[derive(Debug)]
pub struct SharedEngine<U = InMemoryUserStore, M = InMemoryMeetingStore> {
    inner: Arc<RwLock<SchedulingEngine<U, M>>>,
}

impl<U, M> Clone for SharedEngine<U, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SharedEngine {
    fn default() -> Self {
        Self::new(SchedulingEngine::in_memory())
    }
}

impl<U: UserStore, M: MeetingStore> SharedEngine<U, M> {
    /// Wraps an engine for shared use.
    pub fn new(engine: SchedulingEngine<U, M>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// See [`SchedulingEngine::register_user`].
    pub async fn register_user(
        &self,
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> SchedulingResult<User> {
        let mut engine = self.inner.write().await;
        engine.register_user(id, name, email).cloned()
    }

    /// See [`SchedulingEngine::schedule_meeting`]. Holds the write lock for
    /// the availability checks and the writes.
    pub async fn schedule_meeting(
        &self,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        participant_ids: &[UserId],
        host_id: &UserId,
    ) -> SchedulingResult<Meeting> {
        let mut engine = self.inner.write().await;
        engine.schedule_meeting(title, start, end, participant_ids, host_id)
    }

    /// See [`SchedulingEngine::cancel_meeting`].
    pub async fn cancel_meeting(
        &self,
        user_id: &UserId,
        meeting_id: &MeetingId,
    ) -> SchedulingResult<bool> {
        let mut engine = self.inner.write().await;
        engine.cancel_meeting(user_id, meeting_id)
    }

    pub async fn get_meeting(&self, id: &MeetingId) -> Option<Meeting> {
        self.inner.read().await.get_meeting(id).cloned()
    }

    pub async fn user_calendar_meeting_ids(&self, user_id: &UserId) -> Option<Vec<MeetingId>> {
        self.inner
            .read()
            .await
            .user_calendar_meeting_ids(user_id)
            .map(<[MeetingId]>::to_vec)
    }

    pub async fn is_available(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<bool> {
        self.inner.read().await.is_available(user_id, start, end)
    }

    pub async fn meetings_for_user(&self, user_id: &UserId) -> SchedulingResult<Vec<Meeting>> {
        let engine = self.inner.read().await;
        let meetings = engine.meetings_for_user(user_id)?;
        Ok(meetings.into_iter().cloned().collect())
    }

    pub async fn check_consistency(&self) -> Result<(), Vec<ConsistencyFault>> {
        self.inner.read().await.check_consistency()
    }

    /// Borrows the engine for several reads under one lock.
    pub async fn read(&self) -> RwLockReadGuard<'_, SchedulingEngine<U, M>> {
        self.inner.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedulingError;
    use chrono::TimeZone;

    fn at(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 29, h, min, 0).unwrap()
    }

    async fn shared() -> SharedEngine {
        let engine = SharedEngine::default();
        for uid in ["host", "p1", "p2"] {
            engine
                .register_user(uid, uid.to_uppercase(), format!("{uid}@example.com"))
                .await
                .unwrap();
        }
        engine
    }

    #[tokio::test]
    async fn schedule_and_cancel() {
        let engine = shared().await;
        let host = UserId::from("host");

        let meeting = engine
            .schedule_meeting("Sync", at(14, 0), at(15, 0), &[UserId::from("p1")], &host)
            .await
            .unwrap();
        assert_eq!(engine.get_meeting(&meeting.id).await, Some(meeting.clone()));
        assert_eq!(
            engine.user_calendar_meeting_ids(&UserId::from("p1")).await,
            Some(vec![meeting.id.clone()])
        );
        assert!(!engine.is_available(&host, at(14, 0), at(15, 0)).await.unwrap());
        assert_eq!(engine.meetings_for_user(&host).await.unwrap(), vec![meeting.clone()]);

        assert!(engine.cancel_meeting(&host, &meeting.id).await.unwrap());
        assert!(!engine.cancel_meeting(&host, &meeting.id).await.unwrap());
        assert!(engine.get_meeting(&meeting.id).await.is_none());
        assert!(engine.check_consistency().await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let engine = shared().await;
        let other = engine.clone();

        let meeting = other
            .schedule_meeting("Sync", at(9, 0), at(10, 0), &[], &UserId::from("p2"))
            .await
            .unwrap();

        let guard = engine.read().await;
        assert!(guard.get_meeting(&meeting.id).is_some());
        assert_eq!(guard.meetings().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_never_double_book() {
        let engine = shared().await;

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let engine = engine.clone();
                tokio::spawn(async move {
                    let participants = [UserId::from("p1"), UserId::from("p2")];
                    let host = UserId::from("host");
                    engine
                        .schedule_meeting(
                            format!("Race {i}"),
                            at(14, 0),
                            at(15, 0),
                            &participants,
                            &host,
                        )
                        .await
                })
            })
            .collect();

        let mut booked = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => booked += 1,
                Err(SchedulingError::HostUnavailable { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(booked, 1);
        for uid in ["host", "p1", "p2"] {
            let ids = engine
                .user_calendar_meeting_ids(&UserId::from(uid))
                .await
                .unwrap();
            assert_eq!(ids.len(), 1, "calendar of {uid}");
        }
        assert!(engine.check_consistency().await.is_ok());
    }
}
