//! Feed and profile read-model service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AuthorView, FeedPage, FeedPostRecord, FeedQuery, FeedRepository, FeedRepositoryError, PostView,
};
use crate::domain::relative_age::format_relative_age;
use crate::domain::{Error, UserId};

/// Feed service implementing the driving port.
#[derive(Clone)]
pub struct FeedService<F> {
    feed: Arc<F>,
}

impl<F> FeedService<F> {
    /// Create a new service over a feed repository.
    pub fn new(feed: Arc<F>) -> Self {
        Self { feed }
    }
}

fn map_repository_error(error: FeedRepositoryError) -> Error {
    match error {
        FeedRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feed repository unavailable: {message}"))
        }
        FeedRepositoryError::Query { message } => {
            Error::internal(format!("feed repository error: {message}"))
        }
    }
}

fn post_view(record: FeedPostRecord, now: DateTime<Utc>) -> PostView {
    let relative_age = format_relative_age(now, record.created_at);
    PostView {
        id: record.id,
        author: AuthorView::from(record.author),
        content: record.content,
        image_url: record.image_url,
        like_count: record.like_count,
        comment_count: record.comment_count,
        viewer_liked: record.viewer_liked,
        created_at: record.created_at,
        relative_age,
    }
}

#[async_trait]
impl<F> FeedQuery for FeedService<F>
where
    F: FeedRepository,
{
    async fn list_feed(
        &self,
        viewer: Option<UserId>,
        page: FeedPage,
    ) -> Result<Vec<PostView>, Error> {
        let records = self
            .feed
            .list_feed(viewer, page.limit(), page.offset())
            .await
            .map_err(map_repository_error)?;
        let now = Utc::now();
        Ok(records
            .into_iter()
            .map(|record| post_view(record, now))
            .collect())
    }

    async fn list_user_posts(
        &self,
        owner: UserId,
        viewer: Option<UserId>,
        page: FeedPage,
    ) -> Result<Vec<PostView>, Error> {
        let records = self
            .feed
            .list_user_posts(owner, viewer, page.limit(), page.offset())
            .await
            .map_err(map_repository_error)?;
        let now = Utc::now();
        Ok(records
            .into_iter()
            .map(|record| post_view(record, now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Window forwarding and view annotation for feed pages.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{AuthorRecord, MockFeedRepository};
    use chrono::Duration;
    use uuid::Uuid;

    fn record(age_secs: i64, viewer_liked: bool) -> FeedPostRecord {
        FeedPostRecord {
            id: Uuid::from_u128(40),
            author: AuthorRecord {
                id: Uuid::from_u128(41),
                display_name: "Ada".into(),
                nickname: Some("ada".into()),
                picture_url: None,
            },
            content: "hello".into(),
            image_url: None,
            like_count: 2,
            comment_count: 1,
            viewer_liked,
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[tokio::test]
    async fn clamped_window_reaches_the_repository() {
        let mut repo = MockFeedRepository::new();
        repo.expect_list_feed()
            .withf(|viewer, limit, offset| viewer.is_none() && *limit == 50 && *offset == 10)
            .returning(|_, _, _| Ok(Vec::new()));

        let service = FeedService::new(Arc::new(repo));
        let page = FeedPage::new(Some(500), Some(10));
        let posts = service.list_feed(None, page).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn anonymous_viewer_sees_unliked_posts() {
        let mut repo = MockFeedRepository::new();
        repo.expect_list_feed()
            .returning(|_, _, _| Ok(vec![record(30, false)]));

        let service = FeedService::new(Arc::new(repo));
        let posts = service.list_feed(None, FeedPage::default()).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert!(!posts[0].viewer_liked);
        assert_eq!(posts[0].relative_age, "30 sec ago");
    }

    #[tokio::test]
    async fn profile_page_forwards_owner_and_viewer() {
        let owner = UserId::from_uuid(Uuid::from_u128(41));
        let viewer = UserId::from_uuid(Uuid::from_u128(42));
        let mut repo = MockFeedRepository::new();
        repo.expect_list_user_posts()
            .withf(move |o, v, _, _| *o == owner && *v == Some(viewer))
            .returning(|_, _, _, _| Ok(vec![record(90, true)]));

        let service = FeedService::new(Arc::new(repo));
        let posts = service
            .list_user_posts(owner, Some(viewer), FeedPage::default())
            .await
            .unwrap();
        assert!(posts[0].viewer_liked);
        assert_eq!(posts[0].relative_age, "1 min ago");
    }

    #[tokio::test]
    async fn query_failures_surface_as_internal() {
        let mut repo = MockFeedRepository::new();
        repo.expect_list_feed().returning(|_, _, _| {
            Err(FeedRepositoryError::query("relation does not exist"))
        });

        let service = FeedService::new(Arc::new(repo));
        let err = service
            .list_feed(None, FeedPage::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
