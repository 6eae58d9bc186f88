//! Ports for the feed and profile read models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, UserId};

use super::define_port_error;
use super::views::{AuthorRecord, PostView};

define_port_error! {
    /// Errors raised by feed query adapters.
    pub enum FeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "feed repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "feed repository query failed: {message}",
    }
}

/// A feed row: post, author, aggregates and the viewer's liked flag.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPostRecord {
    /// Post id.
    pub id: Uuid,
    /// Denormalised author.
    pub author: AuthorRecord,
    /// Post body.
    pub content: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Aggregate like count.
    pub like_count: i64,
    /// Aggregate comment count.
    pub comment_count: i64,
    /// Whether the viewer has liked the post; false when anonymous.
    pub viewer_liked: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Driven port for paginated post listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Newest-first page across all authors.
    async fn list_feed(
        &self,
        viewer: Option<UserId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedPostRecord>, FeedRepositoryError>;

    /// Newest-first page restricted to one author.
    async fn list_user_posts(
        &self,
        owner: UserId,
        viewer: Option<UserId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedPostRecord>, FeedRepositoryError>;
}

/// Validated limit/offset window for feed queries.
///
/// ## Invariants
/// - `limit` is clamped to `1..=50` (default 20).
/// - `offset` is non-negative (default 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPage {
    limit: i64,
    offset: i64,
}

/// Default page size when the client does not specify one.
pub const DEFAULT_FEED_LIMIT: i64 = 20;
/// Largest page a client may request.
pub const MAX_FEED_LIMIT: i64 = 50;

impl FeedPage {
    /// Clamp raw query parameters into a valid window.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);
        let offset = offset.unwrap_or(0).max(0);
        Self { limit, offset }
    }

    /// Page size.
    pub fn limit(self) -> i64 {
        self.limit
    }

    /// Page start.
    pub fn offset(self) -> i64 {
        self.offset
    }
}

impl Default for FeedPage {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Driving port for feed and profile listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Newest-first feed page for an optional viewer.
    async fn list_feed(
        &self,
        viewer: Option<UserId>,
        page: FeedPage,
    ) -> Result<Vec<PostView>, Error>;

    /// Newest-first page of one profile owner's posts.
    async fn list_user_posts(
        &self,
        owner: UserId,
        viewer: Option<UserId>,
        page: FeedPage,
    ) -> Result<Vec<PostView>, Error>;
}
