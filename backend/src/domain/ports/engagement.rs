//! Ports for post engagement: likes and comments.
//!
//! The like/unlike and comment mutations are transactional units owned by the
//! adapter: conflict-ignoring insert (or idempotent delete), authoritative
//! recount, and the conditional notification insert all commit or roll back
//! together. The domain service only maps outcomes onto API semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, UserId};

use super::define_port_error;
use super::views::{AuthorRecord, CommentView};

define_port_error! {
    /// Errors raised by engagement repository adapters.
    pub enum EngagementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "engagement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "engagement repository query failed: {message}",
    }
}

/// Authoritative like state after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    /// Recomputed like count for the post.
    pub like_count: i64,
    /// Whether the acting user now has a like row for the post.
    pub viewer_liked: bool,
}

/// Result of a like/unlike transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The transaction committed; duplicate likes and missing unlikes are
    /// no-ops that still land here with the authoritative state.
    Applied(LikeState),
    /// The post does not exist; nothing was written.
    PostMissing,
}

/// A stored comment with its denormalised author.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    /// Comment id.
    pub id: Uuid,
    /// Post the comment belongs to.
    pub post_id: Uuid,
    /// Denormalised author.
    pub author: AuthorRecord,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Result of a comment insert transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentOutcome {
    /// Comment inserted; carries the new row and the recomputed count.
    Applied {
        /// The stored comment.
        comment: CommentRecord,
        /// Recomputed comment count for the post.
        comment_count: i64,
    },
    /// The post does not exist; nothing was written.
    PostMissing,
}

/// Driven port for like and comment rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Conflict-ignoring like insert with recount; enqueues a `like`
    /// notification when a new row was created and the author differs from
    /// the liker. One transaction.
    async fn insert_like(
        &self,
        post_id: Uuid,
        user_id: UserId,
    ) -> Result<LikeOutcome, EngagementRepositoryError>;

    /// Idempotent like delete with recount. One transaction.
    async fn delete_like(
        &self,
        post_id: Uuid,
        user_id: UserId,
    ) -> Result<LikeOutcome, EngagementRepositoryError>;

    /// Comment insert with recount. One transaction.
    async fn insert_comment(
        &self,
        post_id: Uuid,
        author_id: UserId,
        content: &str,
    ) -> Result<CommentOutcome, EngagementRepositoryError>;

    /// Comments for a post, oldest first. Unknown post ids yield an empty
    /// list, which is what cascade deletion leaves behind.
    async fn list_comments(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentRecord>, EngagementRepositoryError>;
}

/// Like state as surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeResponse {
    /// Authoritative like count after the mutation.
    pub new_like_count: i64,
    /// The caller's current liked state.
    pub user_liked: bool,
}

/// A created comment plus the updated count.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentAdded {
    /// The stored comment, ready for display.
    pub comment: CommentView,
    /// Authoritative comment count after the insert.
    pub new_comment_count: i64,
}

/// Driving port for like/comment mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementCommand: Send + Sync {
    /// Like a post; duplicate likes are silent no-ops.
    async fn like_post(&self, post_id: Uuid, user: UserId) -> Result<LikeResponse, Error>;

    /// Remove a like; missing likes are silent no-ops.
    async fn unlike_post(&self, post_id: Uuid, user: UserId) -> Result<LikeResponse, Error>;

    /// Comment on a post; content is bounded at 1000 characters.
    async fn add_comment(
        &self,
        post_id: Uuid,
        user: UserId,
        content: String,
    ) -> Result<CommentAdded, Error>;
}

/// Driving port for comment listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// Comments oldest-first with denormalised authors and relative ages.
    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentView>, Error>;
}
