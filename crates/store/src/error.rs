//! Storage error types.

use thiserror::Error;

/// Failures writing to, or talking to, a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters the backend cannot address.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        /// The key being accessed.
        key: String,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized for writing.
    #[error("failed to serialize value for key '{key}': {reason}")]
    Serialize {
        /// The key being written.
        key: String,
        /// Serializer message.
        reason: String,
    },
}

impl StorageError {
    /// Create an invalid key error.
    #[must_use]
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }

    /// Create an I/O error.
    #[must_use]
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialize(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Serialize {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Failures reading a stored value.
///
/// Callers usually recover from these by substituting a default; see
/// [`crate::TieredStore::load_or_default`].
#[derive(Debug, Error)]
pub enum StorageReadError {
    /// The backend could not be read.
    #[error(transparent)]
    Backend(#[from] StorageError),

    /// The stored value is not valid for the expected type.
    #[error("malformed value under key '{key}': {reason}")]
    Malformed {
        /// The key that was read.
        key: String,
        /// Parser message.
        reason: String,
    },
}

impl StorageReadError {
    /// Create a malformed value error.
    #[must_use]
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the value exists but could not be parsed.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
