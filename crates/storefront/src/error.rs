//! Unified error handling.
//!
//! Store mutations never fail - over-deduction clamps and missing ids are
//! no-ops - so nothing here originates inside a store. `AppError` unifies the
//! fallible edges: configuration, the persistence backend, checkout
//! pre-conditions, and the recommendations service.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::RecommendationError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persistence backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout pre-condition failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Recommendations service failed.
    #[error("Recommendations error: {0}")]
    Recommendation(#[from] RecommendationError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
