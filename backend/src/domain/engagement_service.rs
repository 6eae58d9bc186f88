//! Like and comment domain service.
//!
//! Idempotency and the notification gate live in the repository transaction;
//! this service validates input, maps outcomes onto API semantics, and
//! annotates read models with relative ages.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    AuthorView, CommentAdded, CommentOutcome, CommentQuery, CommentRecord, CommentView,
    EngagementCommand, EngagementRepository, EngagementRepositoryError, LikeOutcome, LikeResponse,
};
use crate::domain::relative_age::format_relative_age;
use crate::domain::{CommentContent, CommentContentError, Error, UserId};

/// Engagement service implementing the driving ports.
#[derive(Clone)]
pub struct EngagementService<E> {
    engagement: Arc<E>,
}

impl<E> EngagementService<E> {
    /// Create a new service over an engagement repository.
    pub fn new(engagement: Arc<E>) -> Self {
        Self { engagement }
    }
}

fn map_repository_error(error: EngagementRepositoryError) -> Error {
    match error {
        EngagementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("engagement repository unavailable: {message}"))
        }
        EngagementRepositoryError::Query { message } => {
            Error::internal(format!("engagement repository error: {message}"))
        }
    }
}

fn map_comment_error(error: &CommentContentError) -> Error {
    let code = match error {
        CommentContentError::Empty => "empty_content",
        CommentContentError::TooLong => "content_too_long",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "content",
        "code": code,
    }))
}

fn map_like_outcome(outcome: LikeOutcome) -> Result<LikeResponse, Error> {
    match outcome {
        LikeOutcome::Applied(state) => Ok(LikeResponse {
            new_like_count: state.like_count,
            user_liked: state.viewer_liked,
        }),
        LikeOutcome::PostMissing => Err(Error::not_found("post not found")),
    }
}

fn comment_view(record: CommentRecord, now: DateTime<Utc>) -> CommentView {
    let relative_age = format_relative_age(now, record.created_at);
    CommentView {
        id: record.id,
        post_id: record.post_id,
        author: AuthorView::from(record.author),
        content: record.content,
        created_at: record.created_at,
        relative_age,
    }
}

#[async_trait]
impl<E> EngagementCommand for EngagementService<E>
where
    E: EngagementRepository,
{
    async fn like_post(&self, post_id: Uuid, user: UserId) -> Result<LikeResponse, Error> {
        let outcome = self
            .engagement
            .insert_like(post_id, user)
            .await
            .map_err(map_repository_error)?;
        map_like_outcome(outcome)
    }

    async fn unlike_post(&self, post_id: Uuid, user: UserId) -> Result<LikeResponse, Error> {
        let outcome = self
            .engagement
            .delete_like(post_id, user)
            .await
            .map_err(map_repository_error)?;
        map_like_outcome(outcome)
    }

    async fn add_comment(
        &self,
        post_id: Uuid,
        user: UserId,
        content: String,
    ) -> Result<CommentAdded, Error> {
        let content = CommentContent::parse(&content).map_err(|err| map_comment_error(&err))?;
        let outcome = self
            .engagement
            .insert_comment(post_id, user, content.as_str())
            .await
            .map_err(map_repository_error)?;
        match outcome {
            CommentOutcome::Applied {
                comment,
                comment_count,
            } => Ok(CommentAdded {
                comment: comment_view(comment, Utc::now()),
                new_comment_count: comment_count,
            }),
            CommentOutcome::PostMissing => Err(Error::not_found("post not found")),
        }
    }
}

#[async_trait]
impl<E> CommentQuery for EngagementService<E>
where
    E: EngagementRepository,
{
    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentView>, Error> {
        let records = self
            .engagement
            .list_comments(post_id)
            .await
            .map_err(map_repository_error)?;
        let now = Utc::now();
        Ok(records
            .into_iter()
            .map(|record| comment_view(record, now))
            .collect())
    }
}
