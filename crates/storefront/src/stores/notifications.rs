//! Notification store: bounded feed of user-facing events.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use walmartchain_core::{NewNotification, Notification, NotificationId};

use super::{load_snapshot, persist_snapshot};
use crate::storage::Storage;
use crate::subscription::{Subscribers, SubscriptionId};

const STORAGE_KEY: &str = "walmartchain-notification-storage";

/// Maximum retained feed entries; the oldest beyond the cap are evicted.
pub const MAX_NOTIFICATIONS: usize = 20;

/// Current snapshot schema version.
const SNAPSHOT_VERSION: u32 = 1;

/// Persisted snapshot shape: `{ "version": 1, "notifications": [...] }`.
///
/// The version tag supports future migration; an unrecognized version is
/// discarded rather than misread.
#[derive(Debug, Serialize, Deserialize)]
struct NotificationSnapshot {
    version: u32,
    notifications: Vec<Notification>,
}

impl Default for NotificationSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            notifications: Vec::new(),
        }
    }
}

/// Bounded feed of user-facing messages, presented newest-first.
#[derive(Clone)]
pub struct NotificationStore {
    inner: Arc<NotificationStoreInner>,
}

struct NotificationStoreInner {
    notifications: Mutex<Vec<Notification>>,
    storage: Arc<dyn Storage>,
    subscribers: Subscribers<Vec<Notification>>,
}

impl NotificationStore {
    /// Create a notification store, restoring any persisted snapshot.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let snapshot: NotificationSnapshot =
            load_snapshot(storage.as_ref(), STORAGE_KEY).unwrap_or_default();

        let notifications = if snapshot.version == SNAPSHOT_VERSION {
            snapshot.notifications
        } else {
            warn!(
                version = snapshot.version,
                "discarding notification snapshot with unknown schema version"
            );
            Vec::new()
        };

        Self {
            inner: Arc::new(NotificationStoreInner {
                notifications: Mutex::new(notifications),
                storage,
                subscribers: Subscribers::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.inner
            .notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, notifications: Vec<Notification>) {
        persist_snapshot(
            self.inner.storage.as_ref(),
            STORAGE_KEY,
            &NotificationSnapshot {
                version: SNAPSHOT_VERSION,
                notifications: notifications.clone(),
            },
        );
        self.inner.subscribers.notify(&notifications);
    }

    /// Add an entry to the front of the feed and return it.
    ///
    /// The store fills in a fresh identifier, the current timestamp, and the
    /// unread state, then truncates the feed to the most recent
    /// [`MAX_NOTIFICATIONS`] entries.
    pub fn add_notification(&self, details: NewNotification) -> Notification {
        let notification = Notification {
            id: NotificationId::generate(),
            title: details.title,
            description: details.description,
            timestamp: Utc::now(),
            is_read: false,
            link: details.link,
            category: details.category,
        };

        let notifications = {
            let mut notifications = self.lock();
            notifications.insert(0, notification.clone());
            notifications.truncate(MAX_NOTIFICATIONS);
            notifications.clone()
        };

        debug!(notification_id = %notification.id, "notification added");
        self.commit(notifications);
        notification
    }

    /// Set the read flag on the matching entry. No-op when absent.
    pub fn mark_as_read(&self, id: &NotificationId) {
        let notifications = {
            let mut notifications = self.lock();
            if let Some(notification) = notifications.iter_mut().find(|n| n.id == *id) {
                notification.is_read = true;
            }
            notifications.clone()
        };

        self.commit(notifications);
    }

    /// Set the read flag on every entry.
    pub fn mark_all_as_read(&self) {
        let notifications = {
            let mut notifications = self.lock();
            for notification in notifications.iter_mut() {
                notification.is_read = true;
            }
            notifications.clone()
        };

        self.commit(notifications);
    }

    /// Number of unread entries.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.lock().iter().filter(|n| !n.is_read).count()
    }

    /// Empty the feed unconditionally.
    pub fn clear(&self) {
        let notifications = {
            let mut notifications = self.lock();
            notifications.clear();
            notifications.clone()
        };

        self.commit(notifications);
    }

    /// All entries, newest first by timestamp.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications = self.lock().clone();
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        notifications
    }

    /// Replace the entire feed, e.g. with seeded sample content.
    ///
    /// The feed is still truncated to [`MAX_NOTIFICATIONS`] entries.
    pub fn replace_feed(&self, feed: Vec<Notification>) {
        let notifications = {
            let mut notifications = self.lock();
            *notifications = feed;
            notifications.truncate(MAX_NOTIFICATIONS);
            notifications.clone()
        };

        self.commit(notifications);
    }

    /// Register a listener invoked with the feed after each mutation.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Vec<Notification>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.inner.subscribers.subscribe(listener)
    }

    /// Deregister a listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.unsubscribe(id)
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("notifications", &self.lock().len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use walmartchain_core::NotificationCategory;

    use crate::storage::MemoryStorage;

    use super::*;

    fn store() -> NotificationStore {
        NotificationStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_feed_capped_at_most_recent_twenty() {
        let notifications = store();

        for i in 0..25 {
            notifications.add_notification(NewNotification::new(
                format!("Notification {i}"),
                "details",
            ));
        }

        let feed = notifications.notifications();
        assert_eq!(feed.len(), MAX_NOTIFICATIONS);
        // The newest entry survives; the five oldest were evicted
        assert_eq!(feed.first().unwrap().title, "Notification 24");
        assert!(feed.iter().all(|n| n.title != "Notification 0"));
        assert!(feed.iter().all(|n| n.title != "Notification 4"));
    }

    #[test]
    fn test_unread_count_and_mark_all() {
        let notifications = store();

        let a = notifications.add_notification(NewNotification::new("a", ""));
        let b = notifications.add_notification(NewNotification::new("b", ""));
        notifications.add_notification(NewNotification::new("c", ""));
        notifications.add_notification(NewNotification::new("d", ""));

        notifications.mark_as_read(&a.id);
        notifications.mark_as_read(&b.id);
        assert_eq!(notifications.unread_count(), 2);

        notifications.mark_all_as_read();
        assert_eq!(notifications.unread_count(), 0);
    }

    #[test]
    fn test_mark_missing_id_is_noop() {
        let notifications = store();
        notifications.add_notification(NewNotification::new("a", ""));

        notifications.mark_as_read(&NotificationId::new("nope"));
        assert_eq!(notifications.unread_count(), 1);
    }

    #[test]
    fn test_new_entries_are_unread_and_categorized() {
        let notifications = store();

        let entry = notifications.add_notification(
            NewNotification::new("Order Shipped", "On its way")
                .with_category(NotificationCategory::Order)
                .with_link("/orders"),
        );

        assert!(!entry.is_read);
        assert_eq!(entry.category, Some(NotificationCategory::Order));
        assert_eq!(entry.link.as_deref(), Some("/orders"));
    }

    #[test]
    fn test_snapshot_restores_across_instances() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        let notifications = NotificationStore::new(Arc::clone(&storage));
        notifications.add_notification(NewNotification::new("persisted", ""));

        let reloaded = NotificationStore::new(storage);
        assert_eq!(reloaded.notifications(), notifications.notifications());
    }

    #[test]
    fn test_unknown_snapshot_version_is_discarded() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage
            .set(
                "walmartchain-notification-storage",
                "{\"version\":99,\"notifications\":[]}",
            )
            .unwrap();

        let notifications = NotificationStore::new(storage);
        assert!(notifications.notifications().is_empty());
    }

    #[test]
    fn test_clear() {
        let notifications = store();
        notifications.add_notification(NewNotification::new("a", ""));

        notifications.clear();
        assert!(notifications.notifications().is_empty());
        assert_eq!(notifications.unread_count(), 0);
    }
}
