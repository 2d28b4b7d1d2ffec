//! Key/value storage backends.
//!
//! A backend maps string keys to raw string values. It knows nothing about
//! JSON or tiers; that is the job of [`crate::TieredStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// A raw key/value backend.
///
/// One key holds one value. Writes replace the previous value (last write
/// wins) and there is no atomicity across keys.
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `raw` under `key`, replacing any previous value.
    fn set(&self, key: &str, raw: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Checks that `key` is non-empty and only uses `[A-Za-z0-9._-]`.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && key.chars().any(|c| c != '.');

    if valid {
        Ok(())
    } else {
        Err(StorageError::invalid_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("finops.session")]
    #[case("finops.entity_compliance")]
    #[case("demo-seeded")]
    #[case("A1")]
    fn test_valid_keys(#[case] key: &str) {
        assert!(validate_key(key).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("../etc/passwd")]
    #[case("a/b")]
    #[case("a b")]
    #[case("clé")]
    fn test_invalid_keys(#[case] key: &str) {
        assert!(matches!(validate_key(key), Err(StorageError::InvalidKey(_))));
    }
}
