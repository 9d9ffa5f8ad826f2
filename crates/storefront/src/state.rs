//! Application state shared across front-end handlers.

use std::sync::Arc;

use crate::checkout::Checkout;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::services::RecommendationsClient;
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::stores::{CartStore, NotificationStore, OrderStore, WalletStore};

/// Application state shared across all handlers.
///
/// Bundles the four stores, the checkout coordinator, and the optional
/// recommendations client over one storage backend. Cheaply cloneable via
/// `Arc`; construct once per process and pass handles to whatever needs them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: CartStore,
    wallet: WalletStore,
    orders: OrderStore,
    notifications: NotificationStore,
    checkout: Checkout,
    recommendations: Option<RecommendationsClient>,
}

impl AppState {
    /// Create application state with file-backed persistence under the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// recommendations client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.data_dir)?);
        Self::with_storage(config, storage)
    }

    /// Create application state over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the recommendations client cannot be constructed.
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        let cart = CartStore::new(Arc::clone(&storage));
        let wallet = WalletStore::new();
        let orders = OrderStore::new(Arc::clone(&storage));
        let notifications = NotificationStore::new(storage);

        let checkout = Checkout::new(
            cart.clone(),
            wallet.clone(),
            orders.clone(),
            notifications.clone(),
        );

        let recommendations = match &config.recommendations {
            Some(service_config) => Some(RecommendationsClient::new(service_config)?),
            None => None,
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                wallet,
                orders,
                notifications,
                checkout,
                recommendations,
            }),
        })
    }

    /// Ephemeral state over in-memory storage, for tests and demos.
    ///
    /// # Errors
    ///
    /// Never fails; the ephemeral configuration has no recommendations
    /// service to construct.
    pub fn in_memory() -> Result<Self> {
        Self::with_storage(StorefrontConfig::ephemeral(), Arc::new(MemoryStorage::new()))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the cart store handle.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get the wallet store handle.
    #[must_use]
    pub fn wallet(&self) -> &WalletStore {
        &self.inner.wallet
    }

    /// Get the order store handle.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// Get the notification store handle.
    #[must_use]
    pub fn notifications(&self) -> &NotificationStore {
        &self.inner.notifications
    }

    /// Get the checkout coordinator.
    #[must_use]
    pub fn checkout(&self) -> &Checkout {
        &self.inner.checkout
    }

    /// Get the recommendations client, when the service is configured.
    #[must_use]
    pub fn recommendations(&self) -> Option<&RecommendationsClient> {
        self.inner.recommendations.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("recommendations_enabled", &self.inner.recommendations.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_state_wires_all_stores() {
        let state = AppState::in_memory().unwrap();

        assert!(state.cart().items().is_empty());
        assert_eq!(state.wallet().currencies().len(), 10);
        assert!(state.orders().orders().is_empty());
        assert_eq!(state.notifications().unread_count(), 0);
        assert!(state.recommendations().is_none());
    }
}
