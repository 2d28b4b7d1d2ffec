//! Entity compliance repository.
//!
//! The collection is a map of entity id to record. Entries are parsed one at
//! a time, so a malformed entry only affects lookups of its own entity.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use finops_core::compliance::{ComplianceRecord, ComplianceStatus};
use finops_shared::types::EntityId;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{StorageError, StorageReadError};
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

type RawRecords = BTreeMap<EntityId, serde_json::Value>;

/// Errors from compliance mutations.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// Onboarding data cannot be submitted from the current status.
    #[error("Compliance record in status '{status}' cannot be submitted")]
    NotSubmittable {
        /// The current status.
        status: ComplianceStatus,
    },

    /// The record could not be stored.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Repository for per-entity compliance records.
#[derive(Debug, Clone)]
pub struct ComplianceRepository {
    store: TieredStore,
}

impl ComplianceRepository {
    /// Creates a new compliance repository.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    /// Looks up the record of `entity_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection or this entity's entry cannot be
    /// read. Callers gating access must treat that as "not approved".
    pub fn get_status(
        &self,
        entity_id: &EntityId,
    ) -> Result<Option<ComplianceRecord>, StorageReadError> {
        let records: Option<RawRecords> = self.store.read_json(StorageTier::Durable, keys::COMPLIANCE)?;
        let Some(raw) = records.and_then(|mut r| r.remove(entity_id)) else {
            return Ok(None);
        };
        serde_json::from_value(raw).map(Some).map_err(|e| {
            StorageReadError::malformed(
                format!("{}[{entity_id}]", self.store.key(keys::COMPLIANCE)),
                e.to_string(),
            )
        })
    }

    /// Marks `entity_id` as approved, replacing any previous record.
    pub fn approve(
        &self,
        entity_id: &EntityId,
        entity_data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<ComplianceRecord, StorageError> {
        let record = ComplianceRecord::approved(entity_data, now);
        self.put(entity_id, &record)?;
        info!(entity_id = %entity_id, "Compliance approved");
        Ok(record)
    }

    /// Creates a draft record for `entity_id` if it has no readable record.
    /// Idempotent: an existing record is returned unchanged.
    pub fn ensure_draft(
        &self,
        entity_id: &EntityId,
        now: DateTime<Utc>,
    ) -> Result<ComplianceRecord, StorageError> {
        match self.get_status(entity_id) {
            Ok(Some(existing)) => return Ok(existing),
            Ok(None) => {}
            Err(e) => warn!(entity_id = %entity_id, error = %e, "Unreadable compliance record, resetting to draft"),
        }
        let record = ComplianceRecord::draft(now);
        self.put(entity_id, &record)?;
        info!(entity_id = %entity_id, "Compliance draft created");
        Ok(record)
    }

    /// Submits onboarding data for review.
    ///
    /// Allowed when there is no record yet, or the record is a draft or was
    /// rejected.
    pub fn submit_for_review(
        &self,
        entity_id: &EntityId,
        entity_data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<ComplianceRecord, ComplianceError> {
        if let Ok(Some(current)) = self.get_status(entity_id)
            && !current.status.can_submit()
        {
            return Err(ComplianceError::NotSubmittable {
                status: current.status,
            });
        }
        let record = ComplianceRecord::submitted(entity_data, now);
        self.put(entity_id, &record)?;
        info!(entity_id = %entity_id, "Compliance submitted for review");
        Ok(record)
    }

    fn put(&self, entity_id: &EntityId, record: &ComplianceRecord) -> Result<(), StorageError> {
        let mut records: RawRecords = self.store.load_or_default(StorageTier::Durable, keys::COMPLIANCE);
        let value = serde_json::to_value(record)
            .map_err(|e| StorageError::serialize(self.store.key(keys::COMPLIANCE), e.to_string()))?;
        records.insert(entity_id.clone(), value);
        self.store.write_json(StorageTier::Durable, keys::COMPLIANCE, &records)
    }
}
