//! Registry of per-user sessions with per-user serialization.

use super::{SessionData, SessionError};
use crate::tracker::domain::ExternalUserId;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;

type Slot = Arc<AsyncMutex<SessionData>>;
type Slots = Arc<Mutex<HashMap<ExternalUserId, Slot>>>;

/// Exclusive access to one user's session, held for a whole event.
///
/// Dropping the guard of an empty session evicts the user's slot unless
/// another event is already waiting for it.
#[derive(Debug)]
pub struct SessionGuard {
    data: OwnedMutexGuard<SessionData>,
    user: ExternalUserId,
    slots: Slots,
}

impl Deref for SessionGuard {
    type Target = SessionData;

    fn deref(&self) -> &SessionData {
        &self.data
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut SessionData {
        &mut self.data
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if !self.data.is_empty() {
            return;
        }
        let Ok(mut slots) = self.slots.lock() else {
            return;
        };
        // The map and this guard hold the only references when nobody waits.
        let idle = slots.get(&self.user).is_some_and(|slot| {
            Arc::ptr_eq(slot, OwnedMutexGuard::mutex(&self.data)) && Arc::strong_count(slot) == 2
        });
        if idle {
            slots.remove(&self.user);
            trace!(user = %self.user, "closed idle session");
        }
    }
}

/// Thread-safe map from chat users to their sessions.
///
/// The outer lock is only held while looking up a slot; each slot has its own
/// async lock so that one slow event does not stall other users.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    slots: Slots,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `user`'s session, creating it when the
    /// user has none.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unavailable`] when the registry lock is
    /// poisoned.
    pub async fn acquire(&self, user: ExternalUserId) -> Result<SessionGuard, SessionError> {
        let slot = {
            let mut slots = self
                .slots
                .lock()
                .map_err(|err| SessionError::Unavailable(err.to_string()))?;
            Arc::clone(slots.entry(user).or_insert_with(|| {
                trace!(%user, "opened session");
                Arc::new(AsyncMutex::new(SessionData::new()))
            }))
        };
        Ok(SessionGuard {
            data: slot.lock_owned().await,
            user,
            slots: Arc::clone(&self.slots),
        })
    }

    /// Returns the number of users holding a session slot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unavailable`] when the registry lock is
    /// poisoned.
    pub fn active_sessions(&self) -> Result<usize, SessionError> {
        self.slots
            .lock()
            .map(|slots| slots.len())
            .map_err(|err| SessionError::Unavailable(err.to_string()))
    }
}
