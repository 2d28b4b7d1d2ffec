//! Idempotent demo data provisioning.

pub mod fixtures;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::StorageError;
use crate::keys;
use crate::repositories::{
    EntityRepository, LedgerRepository, OrderRepository, PolicyRepository, PortfolioRepository,
    UserRepository,
};
use crate::tiered::{StorageTier, TieredStore};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Baseline records were written.
    Seeded {
        /// Entities registered.
        entities: usize,
        /// Users stored.
        users: usize,
    },
    /// The demo-seed flag was already set; nothing was written.
    AlreadySeeded,
}

/// Provisions the baseline demo records: entities, users, policies and
/// empty ledger, order and portfolio collections.
#[derive(Debug, Clone)]
pub struct DemoSeeder {
    store: TieredStore,
}

impl DemoSeeder {
    /// Creates a seeder over `store`.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    /// Returns true once seeding has completed.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        self.store
            .load_or_default::<bool>(StorageTier::Durable, keys::DEMO_SEEDED)
    }

    /// Seeds demo data unless the demo-seed flag is set.
    ///
    /// Every step only fills what is missing, so a run interrupted before the
    /// flag is written can simply be repeated.
    pub fn seed(&self, now: DateTime<Utc>) -> Result<SeedOutcome, StorageError> {
        if self.is_seeded() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let entities = EntityRepository::new(self.store.clone());
        let policies = PolicyRepository::new(self.store.clone());
        let demo_entities = fixtures::demo_entities(now);
        for entity in &demo_entities {
            entities.register(&entity.id, &entity.name, entity.created_at)?;
            policies.ensure(&entity.id, fixtures::demo_policy())?;
        }

        let users = UserRepository::new(self.store.clone());
        let demo_users = fixtures::demo_users();
        let user_count = demo_users.len();
        for user in demo_users {
            if users.find_by_id(&user.id).is_none() {
                users.upsert(user)?;
            }
        }

        LedgerRepository::new(self.store.clone()).ensure_initialized()?;
        OrderRepository::new(self.store.clone()).ensure_initialized()?;
        PortfolioRepository::new(self.store.clone()).ensure_initialized()?;

        self.store
            .write_json(StorageTier::Durable, keys::DEMO_SEEDED, &true)?;

        info!(
            entities = demo_entities.len(),
            users = user_count,
            "Demo data seeded"
        );
        Ok(SeedOutcome::Seeded {
            entities: demo_entities.len(),
            users: user_count,
        })
    }
}
