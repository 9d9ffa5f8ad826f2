//! Notification feed commands.

use clap::Subcommand;
use tracing::info;

use walmartchain_core::NotificationId;
use walmartchain_storefront::AppState;

use super::CommandResult;

#[derive(Debug, Subcommand)]
pub enum NotificationsAction {
    /// List the feed, newest first
    List,
    /// Mark one entry as read
    Read {
        /// Notification id
        notification_id: String,
    },
    /// Mark every entry as read
    ReadAll,
    /// Show the unread count
    Unread,
    /// Empty the feed
    Clear,
}

pub fn run(state: &AppState, action: &NotificationsAction) -> CommandResult {
    let notifications = state.notifications();

    match action {
        NotificationsAction::List => {
            let feed = notifications.notifications();
            if feed.is_empty() {
                info!("no notifications");
                return Ok(());
            }
            for notification in &feed {
                info!(
                    id = %notification.id,
                    title = %notification.title,
                    read = notification.is_read,
                    category = %notification
                        .category
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    time = %notification.timestamp.format("%Y-%m-%d %H:%M"),
                    "notification"
                );
            }
        }
        NotificationsAction::Read { notification_id } => {
            notifications.mark_as_read(&NotificationId::new(notification_id.as_str()));
            info!(notification_id = %notification_id, unread = notifications.unread_count(), "marked as read");
        }
        NotificationsAction::ReadAll => {
            notifications.mark_all_as_read();
            info!("all notifications marked as read");
        }
        NotificationsAction::Unread => {
            info!(unread = notifications.unread_count(), "unread notifications");
        }
        NotificationsAction::Clear => {
            notifications.clear();
            info!("notification feed cleared");
        }
    }

    Ok(())
}
