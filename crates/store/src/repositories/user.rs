//! Demo user repository.

use finops_core::entity::EntityUser;
use finops_shared::types::{EntityId, UserId};

use crate::error::StorageError;
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

/// Repository for users that can sign in.
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: TieredStore,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    /// All users in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<EntityUser> {
        self.store.load_or_default(StorageTier::Durable, keys::USERS)
    }

    /// Finds a user by id.
    #[must_use]
    pub fn find_by_id(&self, id: &UserId) -> Option<EntityUser> {
        self.list().into_iter().find(|u| &u.id == id)
    }

    /// Finds a user by email, ignoring case.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<EntityUser> {
        let email = email.trim();
        self.list()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Users of one entity.
    #[must_use]
    pub fn for_entity(&self, entity_id: &EntityId) -> Vec<EntityUser> {
        self.list()
            .into_iter()
            .filter(|u| &u.entity_id == entity_id)
            .collect()
    }

    /// Inserts `user`, or replaces the stored user with the same id.
    pub fn upsert(&self, user: EntityUser) -> Result<(), StorageError> {
        let mut users = self.list();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
        self.store.write_json(StorageTier::Durable, keys::USERS, &users)
    }
}
