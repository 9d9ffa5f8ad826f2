//! Snapshot persistence boundary.
//!
//! Each store persists a full JSON snapshot of its state under a distinct
//! namespaced key after every mutation, for reload-survival only - there is
//! no replication and no server authority. The [`Storage`] trait is the
//! minimal key-value capability the stores require; implementations are
//! injected at construction time.
//!
//! | Store | Key |
//! |---|---|
//! | Cart | `walmartchain-cart-storage` |
//! | Order | `walmartchain-order-storage` |
//! | Notification | `walmartchain-notification-storage` |
//!
//! The wallet is not persisted - it is rebuilt from the fixed seed catalog on
//! every process start.

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur at the persistence boundary.
///
/// Stores log and swallow these - a persist failure never fails a mutation,
/// and a load failure yields the default state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage key is not usable by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Minimal synchronous key-value capability required by the stores.
///
/// Values are JSON documents; the trait itself is agnostic to their shape.
/// Implementations are scoped to the local device - no network replication.
pub trait Storage: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
