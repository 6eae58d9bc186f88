//! Ports for the notification inbox.
//!
//! Marking a notification read deletes the row; there is no retained "read"
//! state. The `is_read` column exists so a retained-history design remains a
//! schema change rather than a rebuild, but current semantics are
//! acknowledge-by-purge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, NotificationKind, UserId};

use super::define_port_error;
use super::views::{AuthorRecord, NotificationView};

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "notification repository query failed: {message}",
    }
}

/// A stored unread notification with its actor denormalised.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    /// Notification id.
    pub id: i64,
    /// Event category.
    pub kind: NotificationKind,
    /// User whose action produced the notification.
    pub actor: AuthorRecord,
    /// Post the event refers to, absent for follows.
    pub post_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Unread inbox snapshot: total plus the newest page.
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadSnapshot {
    /// Total unread notifications for the recipient.
    pub unread_count: i64,
    /// Newest unread notifications, newest first, at most the query limit.
    pub notifications: Vec<NotificationRecord>,
}

/// Driven port for notification rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Unread count plus the newest `limit` unread rows, newest first.
    async fn list_unread(
        &self,
        recipient: UserId,
        limit: i64,
    ) -> Result<UnreadSnapshot, NotificationRepositoryError>;

    /// Delete the recipient's unread rows; an empty id slice means all of
    /// them, a non-empty slice restricts deletion to those ids. Returns the
    /// number of rows removed.
    async fn delete_unread(
        &self,
        recipient: UserId,
        ids: &[i64],
    ) -> Result<u64, NotificationRepositoryError>;
}

/// Unread inbox as surfaced to API clients.
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadNotifications {
    /// Total unread notifications for the caller.
    pub unread_count: i64,
    /// Newest unread notifications with relative ages.
    pub notifications: Vec<NotificationView>,
}

/// Driving port for the notification inbox.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifications: Send + Sync {
    /// The caller's unread count and newest unread notifications.
    async fn list_unread(&self, user: UserId) -> Result<UnreadNotifications, Error>;

    /// Destructively mark notifications read. `ids` empty means all unread;
    /// ids belonging to other users are ignored. Returns the deleted count;
    /// zero matches is a success.
    async fn mark_read(&self, user: UserId, ids: Vec<i64>) -> Result<u64, Error>;
}
