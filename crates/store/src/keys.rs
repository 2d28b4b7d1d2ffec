//! Collection names.
//!
//! Each persisted collection lives under exactly one key. The full key is
//! `<prefix>.<name>`, see [`crate::TieredStore::key`].

/// The current session (ephemeral or durable tier, never both).
pub const SESSION: &str = "session";
/// Map of entity id to compliance record.
pub const COMPLIANCE: &str = "entity_compliance";
/// Map of entity id to entity.
pub const ENTITIES: &str = "entities";
/// Map of entity id to investment policy.
pub const POLICIES: &str = "policies";
/// List of ledger entries.
pub const LEDGER: &str = "ledger";
/// List of orders.
pub const ORDERS: &str = "orders";
/// List of portfolio holdings.
pub const PORTFOLIO: &str = "portfolio";
/// List of demo users.
pub const USERS: &str = "users";
/// Marker set once demo data has been provisioned.
pub const DEMO_SEEDED: &str = "demo_seeded";
