use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

use crate::errors::BookingError;
use crate::models::booking::{Confirmation, Phase};
use crate::services::booking_flow::{BookingFlow, FlowPolicy, FlowSnapshot};
use crate::services::gateway::interface::SubmissionError;

struct Session {
    flow: BookingFlow,
    touched: Instant,
}

/// Where a finished submission landed.
#[derive(Debug)]
pub enum Settled {
    Flow(FlowSnapshot),
    /// The session was discarded while the gateway call was pending.
    Orphaned(Confirmation),
}

/// In-memory booking sessions, one `BookingFlow` per visit.
///
/// The lock is only held for synchronous transitions; callers must not
/// await while inside `with_flow`. Sessions untouched for longer than
/// `idle_timeout` are dropped, except while a submission is in flight.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    policy: FlowPolicy,
    idle_timeout: Option<Duration>,
}

impl SessionStore {
    pub fn new(policy: FlowPolicy, idle_timeout: Option<Duration>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            policy,
            idle_timeout,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_idle(&self, session: &Session, now: Instant) -> bool {
        match self.idle_timeout {
            Some(limit) => {
                session.flow.phase() != Phase::Submitting
                    && now.duration_since(session.touched) > limit
            }
            None => false,
        }
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, Session>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_idle(session, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Dropped {} idle booking sessions", evicted);
        }
    }

    pub fn create(&self) -> (Uuid, FlowSnapshot) {
        let id = Uuid::new_v4();
        let flow = BookingFlow::new(self.policy);
        let snapshot = flow.snapshot();
        let now = Instant::now();

        let mut sessions = self.lock();
        self.evict_idle(&mut sessions, now);
        sessions.insert(id, Session { flow, touched: now });
        info!("Booking session {} started ({} active)", id, sessions.len());

        (id, snapshot)
    }

    pub fn with_flow<T, F>(&self, id: Uuid, f: F) -> Result<T, BookingError>
    where
        F: FnOnce(&mut BookingFlow) -> Result<T, BookingError>,
    {
        let now = Instant::now();
        let mut sessions = self.lock();
        let expired = match sessions.get(&id) {
            Some(session) => self.is_idle(session, now),
            None => return Err(BookingError::SessionNotFound(id)),
        };
        if expired {
            sessions.remove(&id);
            info!("Booking session {} expired", id);
            return Err(BookingError::SessionNotFound(id));
        }

        let session = sessions
            .get_mut(&id)
            .ok_or(BookingError::SessionNotFound(id))?;
        session.touched = now;
        f(&mut session.flow)
    }

    pub fn snapshot(&self, id: Uuid) -> Result<FlowSnapshot, BookingError> {
        self.with_flow(id, |flow| Ok(flow.snapshot()))
    }

    /// Apply a gateway outcome to the session that started the submission.
    ///
    /// A session discarded mid-flight still reports the gateway's own
    /// result: its confirmation, or the submission error.
    pub fn settle(
        &self,
        id: Uuid,
        outcome: Result<Confirmation, SubmissionError>,
    ) -> Result<Settled, BookingError> {
        let mut sessions = self.lock();
        match sessions.get_mut(&id) {
            Some(session) => {
                session.touched = Instant::now();
                session.flow.finish_submit(outcome)?;
                Ok(Settled::Flow(session.flow.snapshot()))
            }
            None => {
                warn!("Booking session {} was discarded during submission", id);
                Ok(Settled::Orphaned(outcome?))
            }
        }
    }

    pub fn remove(&self, id: Uuid) -> Result<(), BookingError> {
        match self.lock().remove(&id) {
            Some(_) => {
                info!("Booking session {} discarded", id);
                Ok(())
            }
            None => Err(BookingError::SessionNotFound(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
