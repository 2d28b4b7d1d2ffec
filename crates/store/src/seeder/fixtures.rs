//! Named demo fixtures.
//!
//! Two independent demo identities exist. The onboarding fixture is what a
//! visitor gets when opening the onboarding flow without a session; the
//! bypass fixture is an already-approved entity used to skip onboarding.

use chrono::{DateTime, Utc};
use finops_core::entity::{Entity, EntityUser};
use finops_core::workflow::{CreditRating, Policy};
use finops_shared::types::{EntityId, UserId};
use finops_shared::{Role, Session};
use rust_decimal::Decimal;
use serde_json::json;

/// Entity used by the onboarding flow.
pub const ONBOARDING_ENTITY_ID: &str = "entity-001";
/// Entity used by the approved-entity bypass.
pub const BYPASS_ENTITY_ID: &str = "urban-threads";

/// The session synthesized on the onboarding path.
#[must_use]
pub fn onboarding_session() -> Session {
    Session::new(
        "demo-preparer",
        "preparer@demo.finops.dev",
        Role::Preparer,
        ONBOARDING_ENTITY_ID,
    )
}

/// The session written by the bypass.
#[must_use]
pub fn bypass_session() -> Session {
    let mut session = Session::new(
        "urban-owner",
        "owner@urbanthreads.in",
        Role::Owner,
        BYPASS_ENTITY_ID,
    );
    session.onboarded = Some(true);
    session
}

/// Onboarding data stored with the bypass entity's approved record.
#[must_use]
pub fn bypass_entity_data() -> serde_json::Value {
    json!({
        "legalName": "Urban Threads Private Limited",
        "constitution": "Private Limited Company",
        "pan": "AABCU9603R",
        "gstin": "29AABCU9603R1ZM",
        "registeredAddress": "12 Residency Road, Bengaluru 560025",
    })
}

/// Entities provisioned by the seeder.
#[must_use]
pub fn demo_entities(now: DateTime<Utc>) -> Vec<Entity> {
    vec![
        Entity::new(ONBOARDING_ENTITY_ID, "Demo Traders LLP", now),
        Entity::new(BYPASS_ENTITY_ID, "Urban Threads Pvt Ltd", now),
    ]
}

/// Users provisioned by the seeder: one per role for the onboarding entity
/// plus the bypass owner.
#[must_use]
pub fn demo_users() -> Vec<EntityUser> {
    let onboarding = EntityId::new(ONBOARDING_ENTITY_ID);
    let preparer = onboarding_session();
    let owner = bypass_session();

    vec![
        EntityUser {
            id: preparer.user_id,
            email: preparer.email,
            name: "Priya Preparer".to_string(),
            role: Role::Preparer,
            entity_id: onboarding.clone(),
        },
        EntityUser {
            id: UserId::new("demo-approver"),
            email: "approver@demo.finops.dev".to_string(),
            name: "Arjun Approver".to_string(),
            role: Role::Approver,
            entity_id: onboarding.clone(),
        },
        EntityUser {
            id: UserId::new("demo-owner"),
            email: "owner@demo.finops.dev".to_string(),
            name: "Olivia Owner".to_string(),
            role: Role::Owner,
            entity_id: onboarding.clone(),
        },
        EntityUser {
            id: UserId::new("demo-auditor"),
            email: "auditor@demo.finops.dev".to_string(),
            name: "Aditi Auditor".to_string(),
            role: Role::Auditor,
            entity_id: onboarding,
        },
        EntityUser {
            id: owner.user_id,
            email: owner.email,
            name: "Rohan Mehta".to_string(),
            role: Role::Owner,
            entity_id: EntityId::new(BYPASS_ENTITY_ID),
        },
    ]
}

/// Policy provisioned for every demo entity.
#[must_use]
pub fn demo_policy() -> Policy {
    Policy {
        min_rating: CreditRating::AaMinus,
        max_tenor_days: 365,
        concentration_cap_pct: Decimal::new(25, 0),
        maker_checker_threshold: Decimal::new(1_000_000, 0),
    }
}
