//! Cart store: intended purchases prior to checkout.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use walmartchain_core::{CartItem, Product, ProductId};

use super::{load_snapshot, persist_snapshot};
use crate::storage::Storage;
use crate::subscription::{Subscribers, SubscriptionId};

const STORAGE_KEY: &str = "walmartchain-cart-storage";

/// Persisted snapshot shape: `{ "items": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CartSnapshot {
    items: Vec<CartItem>,
}

/// Tracks the line items a shopper intends to buy.
///
/// Adding an already carted product increments its quantity rather than
/// producing a second line. Quantity updates that drive a line to zero or
/// below remove it. Totals are recomputed on demand, never cached.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    items: Mutex<Vec<CartItem>>,
    storage: Arc<dyn Storage>,
    subscribers: Subscribers<Vec<CartItem>>,
}

impl CartStore {
    /// Create a cart store, restoring any persisted snapshot.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let snapshot: CartSnapshot =
            load_snapshot(storage.as_ref(), STORAGE_KEY).unwrap_or_default();

        Self {
            inner: Arc::new(CartStoreInner {
                items: Mutex::new(snapshot.items),
                storage,
                subscribers: Subscribers::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
        self.inner
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, items: Vec<CartItem>) {
        persist_snapshot(
            self.inner.storage.as_ref(),
            STORAGE_KEY,
            &CartSnapshot {
                items: items.clone(),
            },
        );
        self.inner.subscribers.notify(&items);
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented;
    /// otherwise a new line with quantity 1 is appended, copying the
    /// product's current price and display fields.
    pub fn add_to_cart(&self, product: &Product) {
        let items = {
            let mut items = self.lock();
            if let Some(item) = items.iter_mut().find(|item| item.id == product.id) {
                item.quantity += 1;
            } else {
                items.push(CartItem::from_product(product));
            }
            items.clone()
        };

        debug!(product_id = %product.id, "added to cart");
        self.commit(items);
    }

    /// Remove the line matching `product_id`. No-op when absent.
    pub fn remove_from_cart(&self, product_id: &ProductId) {
        let items = {
            let mut items = self.lock();
            items.retain(|item| item.id != *product_id);
            items.clone()
        };

        debug!(product_id = %product_id, "removed from cart");
        self.commit(items);
    }

    /// Set the quantity of the line matching `product_id`.
    ///
    /// A quantity of zero or below removes the line entirely. No upper bound
    /// is enforced and no stock check is performed here - stock validation is
    /// a view-layer concern.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) {
        let items = {
            let mut items = self.lock();
            if quantity <= 0 {
                items.retain(|item| item.id != *product_id);
            } else {
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                if let Some(item) = items.iter_mut().find(|item| item.id == *product_id) {
                    item.quantity = quantity;
                }
            }
            items.clone()
        };

        debug!(product_id = %product_id, quantity, "updated cart quantity");
        self.commit(items);
    }

    /// Empty the cart unconditionally.
    pub fn clear(&self) {
        let items = {
            let mut items = self.lock();
            items.clear();
            items.clone()
        };

        debug!("cart cleared");
        self.commit(items);
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().clone()
    }

    /// Sum of unit price times quantity over all lines, in USD.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock().iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lock().iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Register a listener invoked with the item list after each mutation.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Vec<CartItem>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.inner.subscribers.subscribe(listener)
    }

    /// Deregister a listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.unsubscribe(id)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.lock().len())
            .finish()
    }
}
