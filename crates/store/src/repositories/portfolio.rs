//! Portfolio holding repository.

use finops_core::ledger::PortfolioHolding;
use finops_shared::types::EntityId;

use super::ensure_collection;
use crate::error::StorageError;
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

/// Repository for holdings created by settled orders.
#[derive(Debug, Clone)]
pub struct PortfolioRepository {
    store: TieredStore,
}

impl PortfolioRepository {
    /// Creates a new portfolio repository.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    /// All holdings.
    #[must_use]
    pub fn list(&self) -> Vec<PortfolioHolding> {
        self.store.load_or_default(StorageTier::Durable, keys::PORTFOLIO)
    }

    /// Holdings of one entity, nearest maturity first.
    #[must_use]
    pub fn for_entity(&self, entity_id: &EntityId) -> Vec<PortfolioHolding> {
        let mut holdings: Vec<_> = self
            .list()
            .into_iter()
            .filter(|h| &h.entity_id == entity_id)
            .collect();
        holdings.sort_by_key(|h| h.maturity_date);
        holdings
    }

    /// Appends a holding.
    pub fn append(&self, holding: PortfolioHolding) -> Result<(), StorageError> {
        let mut holdings = self.list();
        holdings.push(holding);
        self.store.write_json(StorageTier::Durable, keys::PORTFOLIO, &holdings)
    }

    /// Creates an empty portfolio if none is stored.
    pub fn ensure_initialized(&self) -> Result<bool, StorageError> {
        ensure_collection::<Vec<PortfolioHolding>>(&self.store, keys::PORTFOLIO)
    }
}
