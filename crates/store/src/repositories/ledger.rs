//! Ledger entry repository.

use finops_core::ledger::LedgerEntry;
use finops_shared::types::{EntityId, LedgerEntryId};

use super::{ensure_collection, update_in_list};
use crate::error::StorageError;
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

/// Repository for the append-only cash ledger.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    store: TieredStore,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    /// All entries in append order.
    #[must_use]
    pub fn list(&self) -> Vec<LedgerEntry> {
        self.store.load_or_default(StorageTier::Durable, keys::LEDGER)
    }

    /// Entries of one entity, newest first.
    #[must_use]
    pub fn for_entity(&self, entity_id: &EntityId) -> Vec<LedgerEntry> {
        let mut entries: Vec<_> = self
            .list()
            .into_iter()
            .filter(|e| &e.entity_id == entity_id)
            .collect();
        entries.sort_by(|a, b| b.ts.cmp(&a.ts));
        entries
    }

    /// Finds an entry by id.
    #[must_use]
    pub fn find(&self, id: LedgerEntryId) -> Option<LedgerEntry> {
        self.list().into_iter().find(|e| e.id == id)
    }

    /// Appends an entry.
    pub fn append(&self, entry: LedgerEntry) -> Result<(), StorageError> {
        let mut entries = self.list();
        entries.push(entry);
        self.store.write_json(StorageTier::Durable, keys::LEDGER, &entries)
    }

    /// Applies `f` to entry `id` and stores the result.
    ///
    /// Returns `Ok(None)` if the entry does not exist.
    pub fn update<E>(
        &self,
        id: LedgerEntryId,
        f: impl FnOnce(&mut LedgerEntry) -> Result<(), E>,
    ) -> Result<Option<LedgerEntry>, E>
    where
        E: From<StorageError>,
    {
        update_in_list(&self.store, keys::LEDGER, |e: &LedgerEntry| e.id == id, f)
    }

    /// Creates an empty ledger if none is stored.
    pub fn ensure_initialized(&self) -> Result<bool, StorageError> {
        ensure_collection::<Vec<LedgerEntry>>(&self.store, keys::LEDGER)
    }
}
