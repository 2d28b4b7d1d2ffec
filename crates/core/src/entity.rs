//! Business entities and their users.

use chrono::{DateTime, Utc};
use finops_shared::types::{EntityId, UserId};
use finops_shared::{Role, Session};
use serde::{Deserialize, Serialize};

/// A registered business entity. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl Entity {
    /// Creates a new entity record.
    #[must_use]
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: now,
        }
    }
}

/// A user account that can sign in on behalf of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityUser {
    /// User identifier.
    pub id: UserId,
    /// Sign-in email.
    pub email: String,
    /// Full name.
    pub name: String,
    /// Role within the entity.
    pub role: Role,
    /// The entity the user belongs to.
    pub entity_id: EntityId,
}

impl EntityUser {
    /// Builds the session this user gets on sign-in.
    #[must_use]
    pub fn to_session(&self) -> Session {
        Session::new(
            self.id.clone(),
            self.email.clone(),
            self.role.clone(),
            self.entity_id.clone(),
        )
    }
}
