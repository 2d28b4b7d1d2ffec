//! Repository abstractions over the tiered store.
//!
//! Every repository owns one collection in the durable tier. A collection
//! is read as a whole, changed in memory and written back; an unreadable
//! collection is treated as empty.

pub mod compliance;
pub mod entity;
pub mod ledger;
pub mod order;
pub mod policy;
pub mod portfolio;
pub mod user;

pub use compliance::{ComplianceError, ComplianceRepository};
pub use entity::EntityRepository;
pub use ledger::LedgerRepository;
pub use order::OrderRepository;
pub use policy::PolicyRepository;
pub use portfolio::PortfolioRepository;
pub use user::UserRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StorageError;
use crate::tiered::{StorageTier, TieredStore};

/// Writes an empty collection under `name` unless a readable one exists.
///
/// Returns true if something was written.
pub(crate) fn ensure_collection<T>(store: &TieredStore, name: &str) -> Result<bool, StorageError>
where
    T: Default + Serialize + DeserializeOwned,
{
    match store.read_json::<T>(StorageTier::Durable, name) {
        Ok(Some(_)) => Ok(false),
        Ok(None) => {
            store.write_json(StorageTier::Durable, name, &T::default())?;
            Ok(true)
        }
        Err(e) => {
            warn!(key = %store.key(name), error = %e, "Replacing unreadable collection with an empty one");
            store.write_json(StorageTier::Durable, name, &T::default())?;
            Ok(true)
        }
    }
}

/// Applies `f` to the first item of list `name` matching `is_target` and
/// writes the list back.
///
/// # Returns
/// * `Ok(None)` if no item matches
/// * `Ok(Some(updated))` once the change is stored
/// * `Err(_)` from `f` or from the write; nothing is stored in that case
pub(crate) fn update_in_list<T, E>(
    store: &TieredStore,
    name: &str,
    is_target: impl Fn(&T) -> bool,
    f: impl FnOnce(&mut T) -> Result<(), E>,
) -> Result<Option<T>, E>
where
    T: Clone + Serialize + DeserializeOwned,
    E: From<StorageError>,
{
    let mut items: Vec<T> = store.load_or_default(StorageTier::Durable, name);
    let Some(item) = items.iter_mut().find(|item| is_target(item)) else {
        return Ok(None);
    };
    f(item)?;
    let updated = item.clone();
    store.write_json(StorageTier::Durable, name, &items)?;
    Ok(Some(updated))
}
