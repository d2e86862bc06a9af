//! Session store
//!
//! Process-wide registry of active accusation sessions, keyed by
//! `(community, target)`. Every operation is a short synchronous critical
//! section; the lock is never held across an `.await`, so each call is
//! atomic with respect to other events.

use super::timer::ResolutionTimer;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;
use tribunal_domain::{CommunityId, Session, SessionId, SessionKey};

/// An active session already exists for the key
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("An active session already exists for {0}")]
pub struct SessionConflict(pub SessionKey);

/// A stored session plus its pending resolution
#[derive(Debug)]
struct SessionEntry {
    session: Session,
    timer: Option<ResolutionTimer>,
}

/// Registry of active sessions
///
/// Sessions live only in memory and are lost on restart.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionKey, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionKey, SessionEntry>> {
        // Critical sections never panic midway, so a poisoned map is still consistent
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new session
    ///
    /// The existence check and the insertion happen under one lock.
    pub fn create(&self, session: Session) -> Result<(), SessionConflict> {
        let key = session.key;
        let mut sessions = self.lock();
        if sessions.contains_key(&key) {
            return Err(SessionConflict(key));
        }
        sessions.insert(
            key,
            SessionEntry {
                session,
                timer: None,
            },
        );
        debug!("Session {} registered", key);
        Ok(())
    }

    /// Snapshot of a session
    pub fn get(&self, key: &SessionKey) -> Option<Session> {
        self.lock().get(key).map(|entry| entry.session.clone())
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.lock().contains_key(key)
    }

    /// Run a synchronous mutation against an active session
    ///
    /// Returns `None` when no session exists for the key.
    pub fn with_session<R>(
        &self,
        key: &SessionKey,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        self.lock().get_mut(key).map(|entry| f(&mut entry.session))
    }

    /// Like [`with_session`](Self::with_session), but only while the
    /// session stored under `key` is still the instance `id`
    ///
    /// Returns `None` when the session ended or was replaced by a newer one.
    pub fn with_instance<R>(
        &self,
        key: &SessionKey,
        id: SessionId,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        self.lock()
            .get_mut(key)
            .filter(|entry| entry.session.id == id)
            .map(|entry| f(&mut entry.session))
    }

    /// Attach the resolution timer to session instance `id`
    ///
    /// Hands the timer back when that instance is gone, so the caller can
    /// disarm it. A newer session under the same key keeps its own timer.
    pub fn attach_timer(
        &self,
        key: &SessionKey,
        id: SessionId,
        timer: ResolutionTimer,
    ) -> Result<(), ResolutionTimer> {
        match self
            .lock()
            .get_mut(key)
            .filter(|entry| entry.session.id == id)
        {
            Some(entry) => {
                if let Some(previous) = entry.timer.replace(timer) {
                    previous.disarm();
                }
                Ok(())
            }
            None => Err(timer),
        }
    }

    /// Whether a session has an armed resolution timer
    pub fn has_timer(&self, key: &SessionKey) -> bool {
        self.lock()
            .get(key)
            .and_then(|entry| entry.timer.as_ref())
            .is_some_and(|timer| !timer.is_disarmed())
    }

    /// Remove a session, disarming its timer first
    ///
    /// This is the single claim point for terminal transitions: whichever
    /// caller gets `Some` owns the session, every later caller gets `None`.
    pub fn retire(&self, key: &SessionKey) -> Option<Session> {
        let entry = self.lock().remove(key)?;
        if let Some(timer) = &entry.timer {
            timer.disarm();
        }
        debug!("Session {} retired", key);
        Some(entry.session)
    }

    /// [`retire`](Self::retire) restricted to session instance `id`
    pub fn retire_instance(&self, key: &SessionKey, id: SessionId) -> Option<Session> {
        let entry = {
            let mut sessions = self.lock();
            match sessions.get(key) {
                Some(entry) if entry.session.id == id => sessions.remove(key)?,
                _ => return None,
            }
        };
        if let Some(timer) = &entry.timer {
            timer.disarm();
        }
        debug!("Session {} {} retired", key, id);
        Some(entry.session)
    }

    /// Remove a session without returning it
    pub fn remove(&self, key: &SessionKey) -> bool {
        self.retire(key).is_some()
    }

    /// Keys of the active sessions in a community
    pub fn active_in(&self, community: CommunityId) -> Vec<SessionKey> {
        let mut keys: Vec<_> = self
            .lock()
            .keys()
            .filter(|key| key.community == community)
            .copied()
            .collect();
        keys.sort_by_key(|key| key.target);
        keys
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
