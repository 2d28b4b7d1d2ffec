//! Investment policy repository.

use std::collections::BTreeMap;

use finops_core::workflow::Policy;
use finops_shared::types::EntityId;

use crate::error::StorageError;
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

/// Repository for per-entity investment policies.
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    store: TieredStore,
}

impl PolicyRepository {
    /// Creates a new policy repository.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    fn load(&self) -> BTreeMap<EntityId, Policy> {
        self.store.load_or_default(StorageTier::Durable, keys::POLICIES)
    }

    /// Finds the policy of `entity_id`.
    #[must_use]
    pub fn find(&self, entity_id: &EntityId) -> Option<Policy> {
        self.load().remove(entity_id)
    }

    /// The policy of `entity_id`, or [`Policy::default`] when none is stored.
    #[must_use]
    pub fn get_or_default(&self, entity_id: &EntityId) -> Policy {
        self.find(entity_id).unwrap_or_default()
    }

    /// Stores `policy` for `entity_id` unless one exists, and returns the
    /// stored policy.
    pub fn ensure(&self, entity_id: &EntityId, policy: Policy) -> Result<Policy, StorageError> {
        let mut policies = self.load();
        if let Some(existing) = policies.get(entity_id) {
            return Ok(existing.clone());
        }
        policies.insert(entity_id.clone(), policy.clone());
        self.store.write_json(StorageTier::Durable, keys::POLICIES, &policies)?;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_get_or_default() {
        let repo = PolicyRepository::new(TieredStore::in_memory());
        let id = EntityId::new("entity-001");
        assert!(repo.find(&id).is_none());
        assert_eq!(repo.get_or_default(&id), Policy::default());
    }

    #[test]
    fn test_ensure_keeps_existing() {
        let repo = PolicyRepository::new(TieredStore::in_memory());
        let id = EntityId::new("entity-001");
        let custom = Policy {
            maker_checker_threshold: dec!(250000),
            ..Policy::default()
        };
        repo.ensure(&id, custom.clone()).unwrap();
        let stored = repo.ensure(&id, Policy::default()).unwrap();
        assert_eq!(stored, custom);
        assert_eq!(repo.get_or_default(&id), custom);
    }
}
