//! Post authoring domain service.
//!
//! Ownership is checked here, before any mutation: a missing post is
//! `not_found`, a non-owner is `forbidden`, and only then does the write
//! reach the repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    AuthorView, CreatePostRequest, NewPost, PostCommand, PostRepository, PostRepositoryError,
    PostView,
};
use crate::domain::relative_age::format_relative_age;
use crate::domain::{Error, PostContent, PostContentError, UserId};

/// Post authoring service implementing the driving port.
#[derive(Clone)]
pub struct PostService<P> {
    posts: Arc<P>,
}

impl<P> PostService<P> {
    /// Create a new service over a post repository.
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }
}

fn map_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

fn map_content_error(error: &PostContentError) -> Error {
    let code = match error {
        PostContentError::Empty => "empty_content",
        PostContentError::TooLong => "content_too_long",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "content",
        "code": code,
    }))
}

impl<P> PostService<P>
where
    P: PostRepository,
{
    /// Fetch the post head and enforce that `author` owns it.
    async fn require_owned(&self, post_id: Uuid, author: UserId) -> Result<(), Error> {
        let head = self
            .posts
            .find_post(post_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("post not found"))?;
        if head.author_id != author {
            return Err(Error::forbidden("only the author may modify this post"));
        }
        Ok(())
    }
}

#[async_trait]
impl<P> PostCommand for PostService<P>
where
    P: PostRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<PostView, Error> {
        let content =
            PostContent::parse(&request.content).map_err(|err| map_content_error(&err))?;
        let record = self
            .posts
            .insert_post(NewPost {
                author_id: request.author,
                content: content.into_string(),
                image_url: request.image_url,
            })
            .await
            .map_err(map_repository_error)?;

        let relative_age = format_relative_age(Utc::now(), record.created_at);
        Ok(PostView {
            id: record.id,
            author: AuthorView::from(record.author),
            content: record.content,
            image_url: record.image_url,
            like_count: 0,
            comment_count: 0,
            viewer_liked: false,
            created_at: record.created_at,
            relative_age,
        })
    }

    async fn update_post(
        &self,
        post_id: Uuid,
        author: UserId,
        content: String,
    ) -> Result<String, Error> {
        let content = PostContent::parse(&content).map_err(|err| map_content_error(&err))?;
        self.require_owned(post_id, author).await?;
        self.posts
            .update_content(post_id, content.as_str())
            .await
            .map_err(map_repository_error)?;
        Ok(content.to_html())
    }

    async fn delete_post(&self, post_id: Uuid, author: UserId) -> Result<(), Error> {
        self.require_owned(post_id, author).await?;
        self.posts
            .delete_post(post_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Ownership and validation behaviour for post authoring.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPostRepository, PostHead};
    use uuid::Uuid;

    fn ids() -> (Uuid, UserId, UserId) {
        (
            Uuid::from_u128(1),
            UserId::from_uuid(Uuid::from_u128(2)),
            UserId::from_uuid(Uuid::from_u128(3)),
        )
    }

    #[tokio::test]
    async fn editing_someone_elses_post_is_forbidden() {
        let (post_id, owner, intruder) = ids();
        let mut repo = MockPostRepository::new();
        repo.expect_find_post().returning(move |_| {
            Ok(Some(PostHead {
                id: post_id,
                author_id: owner,
            }))
        });
        repo.expect_update_content().never();

        let service = PostService::new(Arc::new(repo));
        let err = service
            .update_post(post_id, intruder, "new text".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn editing_a_missing_post_is_not_found() {
        let (post_id, owner, _) = ids();
        let mut repo = MockPostRepository::new();
        repo.expect_find_post().returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repo));
        let err = service
            .update_post(post_id, owner, "new text".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn empty_content_is_rejected_before_any_lookup() {
        let (post_id, owner, _) = ids();
        let mut repo = MockPostRepository::new();
        repo.expect_find_post().never();

        let service = PostService::new(Arc::new(repo));
        let err = service
            .update_post(post_id, owner, "   ".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn successful_update_returns_html_rendering() {
        let (post_id, owner, _) = ids();
        let mut repo = MockPostRepository::new();
        repo.expect_find_post().returning(move |_| {
            Ok(Some(PostHead {
                id: post_id,
                author_id: owner,
            }))
        });
        repo.expect_update_content().returning(|_, _| Ok(()));

        let service = PostService::new(Arc::new(repo));
        let html = service
            .update_post(post_id, owner, "a < b\nnext".into())
            .await
            .unwrap();
        assert_eq!(html, "a &lt; b<br>next");
    }

    #[tokio::test]
    async fn delete_checks_ownership_first() {
        let (post_id, owner, intruder) = ids();
        let mut repo = MockPostRepository::new();
        repo.expect_find_post().returning(move |_| {
            Ok(Some(PostHead {
                id: post_id,
                author_id: owner,
            }))
        });
        repo.expect_delete_post().never();

        let service = PostService::new(Arc::new(repo));
        let err = service.delete_post(post_id, intruder).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
