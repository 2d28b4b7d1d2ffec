//! Entity repository.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use finops_core::entity::Entity;
use finops_shared::types::EntityId;
use tracing::info;

use crate::error::StorageError;
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

/// Repository for registered entities.
#[derive(Debug, Clone)]
pub struct EntityRepository {
    store: TieredStore,
}

impl EntityRepository {
    /// Creates a new entity repository.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    fn load(&self) -> BTreeMap<EntityId, Entity> {
        self.store.load_or_default(StorageTier::Durable, keys::ENTITIES)
    }

    /// Finds an entity by id.
    #[must_use]
    pub fn find(&self, id: &EntityId) -> Option<Entity> {
        self.load().remove(id)
    }

    /// All entities, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<Entity> {
        self.load().into_values().collect()
    }

    /// Registers an entity. Entities are immutable: registering an existing
    /// id returns the stored entity unchanged.
    pub fn register(
        &self,
        id: &EntityId,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Entity, StorageError> {
        let mut entities = self.load();
        if let Some(existing) = entities.get(id) {
            return Ok(existing.clone());
        }

        let entity = Entity::new(id.clone(), name, now);
        entities.insert(id.clone(), entity.clone());
        self.store.write_json(StorageTier::Durable, keys::ENTITIES, &entities)?;
        info!(entity_id = %id, "Entity registered");
        Ok(entity)
    }
}
