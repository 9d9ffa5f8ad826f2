//! User-facing notification feed entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NotificationId;
use super::status::NotificationCategory;

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    /// Optional deep-link for the notification to navigate to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NotificationCategory>,
}

/// Caller-supplied fields for a new notification.
///
/// The store fills in the identifier, timestamp, and unread state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewNotification {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub category: Option<NotificationCategory>,
}

impl NewNotification {
    /// Convenience constructor for the common title + description case.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            link: None,
            category: None,
        }
    }

    /// Attach a deep-link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Attach a category.
    #[must_use]
    pub const fn with_category(mut self, category: NotificationCategory) -> Self {
        self.category = Some(category);
        self
    }
}
