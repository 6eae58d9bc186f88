//! Ports for post authoring: creation, owner-only edits, deletion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, UserId};

use super::define_port_error;
use super::views::{AuthorRecord, PostView};

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "post repository query failed: {message}",
    }
}

/// Minimal post projection used for ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostHead {
    /// Post id.
    pub id: Uuid,
    /// Author's user id.
    pub author_id: UserId,
}

/// A freshly inserted post with its denormalised author.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    /// Post id.
    pub id: Uuid,
    /// Denormalised author.
    pub author: AuthorRecord,
    /// Post body.
    pub content: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new post; content is validated upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    /// Authoring user.
    pub author_id: UserId,
    /// Validated, trimmed body.
    pub content: String,
    /// Optional image URL.
    pub image_url: Option<String>,
}

/// Driven port for post rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and return it with author fields denormalised.
    async fn insert_post(&self, new_post: NewPost) -> Result<PostRecord, PostRepositoryError>;

    /// Fetch the ownership projection for a post, `None` when absent.
    async fn find_post(&self, post_id: Uuid) -> Result<Option<PostHead>, PostRepositoryError>;

    /// Replace a post's content and bump `updated_at`.
    async fn update_content(
        &self,
        post_id: Uuid,
        content: &str,
    ) -> Result<(), PostRepositoryError>;

    /// Delete a post row; likes and comments go with it via cascade.
    async fn delete_post(&self, post_id: Uuid) -> Result<(), PostRepositoryError>;
}

/// Request payload for creating a post.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePostRequest {
    /// Authoring user.
    pub author: UserId,
    /// Raw body as submitted.
    pub content: String,
    /// Optional image URL.
    pub image_url: Option<String>,
}

/// Driving port for post authoring use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Create a post; rejects empty or oversized content.
    async fn create_post(&self, request: CreatePostRequest) -> Result<PostView, Error>;

    /// Edit a post's content as its owner; returns the HTML-safe rendering
    /// of the new content for immediate client display.
    async fn update_post(
        &self,
        post_id: Uuid,
        author: UserId,
        content: String,
    ) -> Result<String, Error>;

    /// Delete a post as its owner.
    async fn delete_post(&self, post_id: Uuid, author: UserId) -> Result<(), Error>;
}
