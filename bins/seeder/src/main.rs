//! Demo data seeder for finops development.
//!
//! Provisions the demo entities, users, policies and empty collections in
//! the durable store. Running it twice is a no-op.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finops_shared::AppConfig;
use finops_store::{DemoSeeder, FileStore, MemoryStore, SeedOutcome, TieredStore};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let durable = FileStore::open(&config.storage.data_dir)?;
    let store =
        TieredStore::new(MemoryStore::new(), durable).with_prefix(&config.storage.key_prefix);
    info!(
        data_dir = %config.storage.data_dir.display(),
        key_prefix = %config.storage.key_prefix,
        "Opened durable store"
    );

    match DemoSeeder::new(store).seed(Utc::now())? {
        SeedOutcome::Seeded { entities, users } => {
            info!(entities, users, "Seeding complete");
        }
        SeedOutcome::AlreadySeeded => info!("Demo data already present, skipping"),
    }

    Ok(())
}
