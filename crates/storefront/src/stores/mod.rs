//! The four state containers.
//!
//! Each store exclusively owns its slice of state behind a cheaply cloneable
//! handle. Mutations follow the same pipeline everywhere: take the state
//! lock, apply the change, snapshot the new state, release the lock, persist
//! the snapshot, notify subscribers. Store operations never fail; persistence
//! problems are logged and swallowed so in-memory state stays authoritative.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::storage::Storage;

pub mod cart;
pub mod notifications;
pub mod orders;
pub mod wallet;

pub use cart::CartStore;
pub use notifications::NotificationStore;
pub use orders::OrderStore;
pub use wallet::WalletStore;

/// Persist a snapshot, logging and swallowing any failure.
pub(crate) fn persist_snapshot<T: Serialize>(storage: &dyn Storage, key: &str, snapshot: &T) {
    let json = match serde_json::to_string(snapshot) {
        Ok(json) => json,
        Err(err) => {
            warn!(key, error = %err, "failed to serialize snapshot");
            return;
        }
    };

    if let Err(err) = storage.set(key, &json) {
        warn!(key, error = %err, "failed to persist snapshot");
    }
}

/// Load a snapshot, yielding `None` (and a warning) when it is missing,
/// unreadable, or corrupt. Callers fall back to the default state.
pub(crate) fn load_snapshot<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let json = match storage.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(err) => {
            warn!(key, error = %err, "failed to read snapshot");
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(key, error = %err, "ignoring corrupt snapshot");
            None
        }
    }
}
