//! Order store: append-only record of completed purchases.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use walmartchain_core::{Order, OrderId, OrderStatus};

use super::{load_snapshot, persist_snapshot};
use crate::storage::Storage;
use crate::subscription::{Subscribers, SubscriptionId};

const STORAGE_KEY: &str = "walmartchain-order-storage";

/// Persisted snapshot shape: `{ "orders": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct OrderSnapshot {
    orders: Vec<Order>,
}

/// Append-only history of completed purchases.
///
/// Orders are never validated here - internal consistency is the caller's
/// responsibility at checkout time - and never mutated in place, with the one
/// exception of the explicit status entry point.
#[derive(Clone)]
pub struct OrderStore {
    inner: Arc<OrderStoreInner>,
}

struct OrderStoreInner {
    orders: Mutex<Vec<Order>>,
    storage: Arc<dyn Storage>,
    subscribers: Subscribers<Vec<Order>>,
}

impl OrderStore {
    /// Create an order store, restoring any persisted snapshot.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let snapshot: OrderSnapshot =
            load_snapshot(storage.as_ref(), STORAGE_KEY).unwrap_or_default();

        Self {
            inner: Arc::new(OrderStoreInner {
                orders: Mutex::new(snapshot.orders),
                storage,
                subscribers: Subscribers::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Order>> {
        self.inner
            .orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, orders: Vec<Order>) {
        persist_snapshot(
            self.inner.storage.as_ref(),
            STORAGE_KEY,
            &OrderSnapshot {
                orders: orders.clone(),
            },
        );
        self.inner.subscribers.notify(&orders);
    }

    /// Prepend a completed order to the history.
    pub fn add_order(&self, order: Order) {
        info!(order_id = %order.id, total = %order.total_amount_usd, "order recorded");

        let orders = {
            let mut orders = self.lock();
            orders.insert(0, order);
            orders.clone()
        };

        self.commit(orders);
    }

    /// All orders, newest first by purchase timestamp.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        let mut orders = self.lock().clone();
        orders.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
        orders
    }

    /// Look up one order by id.
    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.lock().iter().find(|order| order.id == *id).cloned()
    }

    /// Update the status of an existing order. No-op when the id is unknown.
    ///
    /// This entry point exists for consuming systems that progress orders
    /// externally; nothing in the core transitions statuses on its own.
    pub fn update_status(&self, id: &OrderId, status: OrderStatus) {
        let orders = {
            let mut orders = self.lock();
            if let Some(order) = orders.iter_mut().find(|order| order.id == *id) {
                order.status = status;
            }
            orders.clone()
        };

        debug!(order_id = %id, %status, "order status updated");
        self.commit(orders);
    }

    /// Drop the entire history.
    pub fn clear(&self) {
        let orders = {
            let mut orders = self.lock();
            orders.clear();
            orders.clone()
        };

        self.commit(orders);
    }

    /// Register a listener invoked with the history after each mutation.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Vec<Order>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.inner.subscribers.subscribe(listener)
    }

    /// Deregister a listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.unsubscribe(id)
    }
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("orders", &self.lock().len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use walmartchain_core::PaymentMethod;

    use crate::storage::MemoryStorage;

    use super::*;

    fn order(id: &str, minutes_ago: i64) -> Order {
        Order {
            id: OrderId::new(id),
            items: Vec::new(),
            total_amount_usd: Decimal::from(100),
            payment_method: PaymentMethod::Crypto,
            crypto: None,
            purchase_date: Utc::now() - Duration::minutes(minutes_ago),
            status: OrderStatus::Processing,
            transaction_id: None,
        }
    }

    fn store() -> OrderStore {
        OrderStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_orders_sorted_newest_first_regardless_of_insertion_order() {
        let orders = store();

        // T1 oldest .. T3 newest, inserted out of order
        orders.add_order(order("t2", 20));
        orders.add_order(order("t3", 10));
        orders.add_order(order("t1", 30));

        let sorted: Vec<String> = orders
            .orders()
            .into_iter()
            .map(|order| order.id.to_string())
            .collect();
        assert_eq!(sorted, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_add_order_preserves_existing_entries() {
        let orders = store();
        orders.add_order(order("first", 10));
        let first_before = orders.order(&OrderId::new("first")).unwrap();

        orders.add_order(order("second", 5));

        let first_after = orders.order(&OrderId::new("first")).unwrap();
        assert_eq!(first_before, first_after);
    }

    #[test]
    fn test_update_status() {
        let orders = store();
        orders.add_order(order("o1", 10));

        orders.update_status(&OrderId::new("o1"), OrderStatus::Shipped);
        assert_eq!(
            orders.order(&OrderId::new("o1")).unwrap().status,
            OrderStatus::Shipped
        );

        // Unknown id is a harmless no-op
        orders.update_status(&OrderId::new("nope"), OrderStatus::Delivered);
        assert_eq!(orders.orders().len(), 1);
    }

    #[test]
    fn test_snapshot_restores_across_instances() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        let orders = OrderStore::new(Arc::clone(&storage));
        orders.add_order(order("o1", 10));
        orders.add_order(order("o2", 5));

        let reloaded = OrderStore::new(storage);
        assert_eq!(reloaded.orders(), orders.orders());
    }

    #[test]
    fn test_clear() {
        let orders = store();
        orders.add_order(order("o1", 10));

        orders.clear();
        assert!(orders.orders().is_empty());
    }
}
