//! Two-tier JSON persistence.
//!
//! The ephemeral tier lives as long as one tab; the durable tier survives
//! restarts ("remember me"). Domain collections live in the durable tier;
//! only the session moves between tiers.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::backend::{KeyValueStore, MemoryStore, validate_key};
use crate::error::{StorageError, StorageReadError};

/// Default prefix applied to every key.
pub const DEFAULT_KEY_PREFIX: &str = "finops";

/// A storage tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageTier {
    /// Per-tab storage, gone when the tab closes.
    Ephemeral,
    /// Storage that survives restarts.
    Durable,
}

impl StorageTier {
    /// Tiers in resolution order: durable overrides ephemeral.
    pub const RESOLUTION_ORDER: [Self; 2] = [Self::Durable, Self::Ephemeral];

    /// Returns the string representation of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ephemeral => "ephemeral",
            Self::Durable => "durable",
        }
    }

    /// The other tier.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Ephemeral => Self::Durable,
            Self::Durable => Self::Ephemeral,
        }
    }

    /// The tier a session is written to.
    #[must_use]
    pub const fn for_persist(persist: bool) -> Self {
        if persist { Self::Durable } else { Self::Ephemeral }
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pair of backends addressed by tier, storing JSON values.
///
/// Cloning is cheap and clones share both backends.
#[derive(Clone)]
pub struct TieredStore {
    ephemeral: Arc<dyn KeyValueStore>,
    durable: Arc<dyn KeyValueStore>,
    prefix: Arc<str>,
}

impl fmt::Debug for TieredStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieredStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl TieredStore {
    /// Creates a store over the given backends.
    pub fn new(
        ephemeral: impl KeyValueStore + 'static,
        durable: impl KeyValueStore + 'static,
    ) -> Self {
        Self {
            ephemeral: Arc::new(ephemeral),
            durable: Arc::new(durable),
            prefix: Arc::from(DEFAULT_KEY_PREFIX),
        }
    }

    /// Creates a store with two fresh in-memory backends.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }

    /// Checks that `prefix` yields valid backend keys. An empty prefix is
    /// allowed and leaves collection names unprefixed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for characters outside
    /// `[A-Za-z0-9._-]` or an all-dot prefix.
    pub fn validate_prefix(prefix: &str) -> Result<(), StorageError> {
        if prefix.is_empty() {
            return Ok(());
        }
        validate_key(prefix)
    }

    /// Replaces the key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.prefix = Arc::from(prefix.as_ref());
        self
    }

    /// Full backend key of collection `name`.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.prefix)
        }
    }

    /// The backend behind `tier`.
    #[must_use]
    pub fn backend(&self, tier: StorageTier) -> &dyn KeyValueStore {
        match tier {
            StorageTier::Ephemeral => self.ephemeral.as_ref(),
            StorageTier::Durable => self.durable.as_ref(),
        }
    }

    /// Reads and parses collection `name` from `tier`.
    ///
    /// # Returns
    /// * `Ok(None)` if nothing is stored
    /// * `Err(StorageReadError::Malformed)` if the stored text does not parse as `T`
    pub fn read_json<T: DeserializeOwned>(
        &self,
        tier: StorageTier,
        name: &str,
    ) -> Result<Option<T>, StorageReadError> {
        let key = self.key(name);
        let Some(raw) = self.backend(tier).get(&key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageReadError::malformed(key, e.to_string()))
    }

    /// Reads collection `name`, substituting `T::default()` when it is absent
    /// or unreadable.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, tier: StorageTier, name: &str) -> T {
        match self.read_json(tier, name) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key = %self.key(name), tier = %tier, error = %e, "Unreadable stored value, using default");
                T::default()
            }
        }
    }

    /// Serializes `value` and writes it to `tier`.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        tier: StorageTier,
        name: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let key = self.key(name);
        let raw =
            serde_json::to_string(value).map_err(|e| StorageError::serialize(&key, e.to_string()))?;
        self.backend(tier).set(&key, &raw)
    }

    /// Removes collection `name` from `tier`.
    pub fn remove_from(&self, tier: StorageTier, name: &str) -> Result<(), StorageError> {
        self.backend(tier).remove(&self.key(name))
    }

    /// Finds `name` in the first tier holding a readable value, durable first.
    ///
    /// Unreadable tiers are logged and skipped; this never fails.
    pub fn resolve<T: DeserializeOwned>(&self, name: &str) -> Option<(StorageTier, T)> {
        StorageTier::RESOLUTION_ORDER.into_iter().find_map(|tier| {
            match self.read_json(tier, name) {
                Ok(found) => found.map(|value| (tier, value)),
                Err(e) => {
                    warn!(key = %self.key(name), tier = %tier, error = %e, "Skipping unreadable tier");
                    None
                }
            }
        })
    }
}
