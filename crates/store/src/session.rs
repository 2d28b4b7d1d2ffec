//! Session lifecycle over the two storage tiers.
//!
//! The session lives in exactly one tier. Writing it to one tier clears the
//! other, and hydration reads the durable tier first.

use finops_shared::Session;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

/// Lifecycle state of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Cached state was discarded; the next read re-hydrates.
    #[default]
    Unknown,
    /// Waiting for the stored session to be read.
    Hydrating,
    /// A session is active.
    Authenticated(Session),
    /// No session is stored.
    Anonymous,
}

impl SessionState {
    /// Returns true once hydration finished.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Anonymous)
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Owns the current session and the tier it is stored in.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: TieredStore,
    state: SessionState,
}

impl SessionManager {
    /// Creates a manager for a freshly started process, in `Hydrating`.
    #[must_use]
    pub fn new(store: TieredStore) -> Self {
        Self {
            store,
            state: SessionState::Hydrating,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Reads the stored session, durable tier first. Never fails: unreadable
    /// tiers count as empty.
    pub fn hydrate(&mut self) -> Option<Session> {
        self.state = SessionState::Hydrating;
        let session = self
            .store
            .resolve::<Session>(keys::SESSION)
            .map(|(_, session)| session);

        self.state = match &session {
            Some(s) => SessionState::Authenticated(s.clone()),
            None => SessionState::Anonymous,
        };
        debug!(authenticated = session.is_some(), "Session hydrated");
        session
    }

    /// The active session, hydrating first if the state is not settled.
    pub fn current(&mut self) -> Option<Session> {
        if self.state.is_settled() {
            self.state.session().cloned()
        } else {
            self.hydrate()
        }
    }

    /// Stores `session` in the durable tier when `persist`, otherwise in the
    /// ephemeral tier, and clears the other tier.
    ///
    /// # Errors
    ///
    /// Returns an error if either tier cannot be written. If the first write
    /// fails nothing has changed.
    pub fn set_session(&mut self, session: Session, persist: bool) -> Result<(), StorageError> {
        let tier = StorageTier::for_persist(persist);
        self.store.write_json(tier, keys::SESSION, &session)?;
        self.store.remove_from(tier.other(), keys::SESSION)?;

        info!(user_id = %session.user_id, role = %session.role, tier = %tier, "Session stored");
        self.state = SessionState::Authenticated(session);
        Ok(())
    }

    /// Removes the session from both tiers. Idempotent.
    pub fn clear_session(&mut self) -> Result<(), StorageError> {
        for tier in StorageTier::RESOLUTION_ORDER {
            self.store.remove_from(tier, keys::SESSION)?;
        }
        if self.state.session().is_some() {
            info!("Session cleared");
        }
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Signs in with `session`. `remember_me` selects the durable tier.
    pub fn login(&mut self, session: Session, remember_me: bool) -> Result<(), StorageError> {
        self.set_session(session, remember_me)
    }

    /// Signs out.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.clear_session()
    }

    /// Discards the cached state so the next read re-hydrates from storage.
    pub fn invalidate(&mut self) {
        self.state = SessionState::Unknown;
    }

    /// The tier the stored session currently lives in.
    #[must_use]
    pub fn stored_tier(&self) -> Option<StorageTier> {
        self.store
            .resolve::<Session>(keys::SESSION)
            .map(|(tier, _)| tier)
    }
}
