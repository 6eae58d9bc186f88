//! Read-model types shared between driving ports and HTTP handlers.
//!
//! Records are what driven ports return from the store; views are records
//! annotated for display (humanised relative age) and serialised directly by
//! the inbound adapter.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::NotificationKind;

/// Denormalised author fields attached to posts, comments and notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    /// Author's user id.
    pub id: Uuid,
    /// Display name at read time.
    pub display_name: String,
    /// Optional unique handle.
    pub nickname: Option<String>,
    /// Optional avatar URL.
    pub picture_url: Option<String>,
}

/// Author payload serialised to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    /// Author's user id.
    pub id: Uuid,
    /// Display name at read time.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional unique handle.
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional avatar URL.
    pub picture_url: Option<String>,
}

impl From<AuthorRecord> for AuthorView {
    fn from(record: AuthorRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name,
            nickname: record.nickname,
            picture_url: record.picture_url,
        }
    }
}

/// A post with aggregate counts and the viewer's liked flag.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    /// Post id.
    pub id: Uuid,
    /// Denormalised author.
    pub author: AuthorView,
    /// Post body.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Authoritative like count.
    pub like_count: i64,
    /// Authoritative comment count.
    pub comment_count: i64,
    /// Whether the requesting viewer has liked this post; false anonymously.
    pub viewer_liked: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Humanised age, e.g. "5 min ago".
    pub relative_age: String,
}

/// A comment with its denormalised author.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment id.
    pub id: Uuid,
    /// Post the comment belongs to.
    pub post_id: Uuid,
    /// Denormalised author.
    pub author: AuthorView,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Humanised age.
    pub relative_age: String,
}

/// An unread notification annotated with its actor.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    /// Notification id; integral on the wire for mark-read requests.
    pub id: i64,
    /// Event category.
    #[schema(value_type = String, example = "like")]
    pub kind: NotificationKind,
    /// User whose action triggered the notification.
    pub actor: AuthorView,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Post the event refers to, absent for follows.
    pub post_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Humanised age.
    pub relative_age: String,
}

/// The authenticated user's own profile payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// User id.
    pub id: Uuid,
    /// Email reported by the identity provider.
    pub email: String,
    /// Display name.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional unique handle.
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional avatar URL.
    pub picture_url: Option<String>,
}
