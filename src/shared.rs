//! Thread-safe session handle.
//!
//! Wraps a `Session` in `Arc<Mutex<_>>` so several callers (UI thread,
//! background exporters) can send intents to the same state. A poisoned lock
//! is recovered: the session never holds partially-applied mutations.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::session::Session;

#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Session lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }
}
