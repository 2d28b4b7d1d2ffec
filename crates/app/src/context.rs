//! The application context passed to the guard, desks and dashboard.

use finops_shared::types::EntityId;
use finops_shared::{AppConfig, Session};
use finops_store::seeder::fixtures;
use finops_store::{
    ComplianceRepository, DemoSeeder, EntityRepository, FileStore, LedgerRepository, MemoryStore,
    OrderRepository, PolicyRepository, PortfolioRepository, SessionManager, StorageError,
    TieredStore, UserRepository,
};

use crate::error::DeskError;

/// Everything one client needs: configuration, storage and the session.
///
/// There are no globals; every operation receives the context explicitly.
#[derive(Debug)]
pub struct AppContext {
    config: AppConfig,
    store: TieredStore,
    sessions: SessionManager,
}

impl AppContext {
    /// Creates a context over `store`.
    #[must_use]
    pub fn new(store: TieredStore, config: AppConfig) -> Self {
        let sessions = SessionManager::new(store.clone());
        Self {
            config,
            store,
            sessions,
        }
    }

    /// Creates a context over two in-memory tiers with default configuration.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(TieredStore::in_memory(), AppConfig::default())
    }

    /// Creates a context whose durable tier lives in `config.storage.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key prefix is not a valid key or the data
    /// directory cannot be created.
    pub fn from_config(config: AppConfig) -> Result<Self, StorageError> {
        TieredStore::validate_prefix(&config.storage.key_prefix)?;
        let durable = FileStore::open(&config.storage.data_dir)?;
        let store =
            TieredStore::new(MemoryStore::new(), durable).with_prefix(&config.storage.key_prefix);
        Ok(Self::new(store, config))
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &TieredStore {
        &self.store
    }

    /// The session manager.
    pub fn sessions(&mut self) -> &mut SessionManager {
        &mut self.sessions
    }

    /// The current session, hydrating it if needed.
    pub fn session(&mut self) -> Option<Session> {
        self.sessions.current()
    }

    /// The current session, or [`DeskError::NoSession`].
    pub fn require_session(&mut self) -> Result<Session, DeskError> {
        self.session().ok_or(DeskError::NoSession)
    }

    /// Drops cached session state, as a page reload would.
    pub fn reload(&mut self) {
        self.sessions.invalidate();
    }

    /// Entity a session acts for. Sessions without one fall back to the
    /// onboarding entity.
    #[must_use]
    pub fn entity_of(session: &Session) -> EntityId {
        session.entity_or(&EntityId::new(fixtures::ONBOARDING_ENTITY_ID))
    }

    /// Compliance repository.
    #[must_use]
    pub fn compliance(&self) -> ComplianceRepository {
        ComplianceRepository::new(self.store.clone())
    }

    /// Entity repository.
    #[must_use]
    pub fn entities(&self) -> EntityRepository {
        EntityRepository::new(self.store.clone())
    }

    /// Policy repository.
    #[must_use]
    pub fn policies(&self) -> PolicyRepository {
        PolicyRepository::new(self.store.clone())
    }

    /// User repository.
    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    /// Ledger repository.
    #[must_use]
    pub fn ledger(&self) -> LedgerRepository {
        LedgerRepository::new(self.store.clone())
    }

    /// Order repository.
    #[must_use]
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }

    /// Portfolio repository.
    #[must_use]
    pub fn portfolio(&self) -> PortfolioRepository {
        PortfolioRepository::new(self.store.clone())
    }

    /// Demo seeder.
    #[must_use]
    pub fn seeder(&self) -> DemoSeeder {
        DemoSeeder::new(self.store.clone())
    }
}
