//! Persistence layer for finops.
//!
//! This crate provides:
//! - Raw key/value backends (in-memory and file-based)
//! - The two-tier JSON store (ephemeral and durable)
//! - The session lifecycle manager
//! - Repositories for every persisted collection
//! - The idempotent demo data seeder

pub mod backend;
pub mod error;
pub mod keys;
pub mod repositories;
pub mod seeder;
pub mod session;
pub mod tiered;

#[cfg(test)]
mod session_props;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StorageError, StorageReadError};
pub use repositories::{
    ComplianceError, ComplianceRepository, EntityRepository, LedgerRepository, OrderRepository,
    PolicyRepository, PortfolioRepository, UserRepository,
};
pub use seeder::{DemoSeeder, SeedOutcome};
pub use session::{SessionManager, SessionState};
pub use tiered::{StorageTier, TieredStore};
