//! PostgreSQL-backed `FeedRepository` implementation using Diesel ORM.
//!
//! Pages are loaded newest-first with the author joined in, then the like and
//! comment aggregates for just that page are fetched in two grouped queries
//! and the viewer's liked post ids in a third. Counts are recomputed from the
//! underlying rows on every read; nothing is denormalised.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{FeedPostRecord, FeedRepository, FeedRepositoryError};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AuthorRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, likes, posts, users};

/// Diesel-backed implementation of the `FeedRepository` port.
#[derive(Clone)]
pub struct DieselFeedQuery {
    pool: DbPool,
}

impl DieselFeedQuery {
    /// Create a new query adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeedRepositoryError {
    map_basic_pool_error(error, FeedRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FeedRepositoryError {
    map_basic_diesel_error(
        error,
        FeedRepositoryError::query,
        FeedRepositoryError::connection,
    )
}

/// Assemble page rows plus their aggregates into feed records.
async fn annotate_page(
    conn: &mut AsyncPgConnection,
    rows: Vec<(PostRow, AuthorRow)>,
    viewer: Option<UserId>,
) -> Result<Vec<FeedPostRecord>, diesel::result::Error> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let post_ids: Vec<Uuid> = rows.iter().map(|(post, _)| post.id).collect();

    let like_counts: HashMap<Uuid, i64> = likes::table
        .filter(likes::post_id.eq_any(&post_ids))
        .group_by(likes::post_id)
        .select((likes::post_id, diesel::dsl::count_star()))
        .load::<(Uuid, i64)>(conn)
        .await?
        .into_iter()
        .collect();

    let comment_counts: HashMap<Uuid, i64> = comments::table
        .filter(comments::post_id.eq_any(&post_ids))
        .group_by(comments::post_id)
        .select((comments::post_id, diesel::dsl::count_star()))
        .load::<(Uuid, i64)>(conn)
        .await?
        .into_iter()
        .collect();

    let viewer_likes: HashSet<Uuid> = match viewer {
        Some(viewer) => likes::table
            .filter(likes::post_id.eq_any(&post_ids))
            .filter(likes::user_id.eq(viewer.as_uuid()))
            .select(likes::post_id)
            .load::<Uuid>(conn)
            .await?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    Ok(rows
        .into_iter()
        .map(|(post, author)| FeedPostRecord {
            viewer_liked: viewer_likes.contains(&post.id),
            like_count: like_counts.get(&post.id).copied().unwrap_or(0),
            comment_count: comment_counts.get(&post.id).copied().unwrap_or(0),
            id: post.id,
            author: author.into(),
            content: post.content,
            image_url: post.image_url,
            created_at: post.created_at,
        })
        .collect())
}

#[async_trait]
impl FeedRepository for DieselFeedQuery {
    async fn list_feed(
        &self,
        viewer: Option<UserId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedPostRecord>, FeedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PostRow, AuthorRow)> = posts::table
            .inner_join(users::table)
            .order_by(posts::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((PostRow::as_select(), AuthorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        annotate_page(&mut conn, rows, viewer)
            .await
            .map_err(map_diesel_error)
    }

    async fn list_user_posts(
        &self,
        owner: UserId,
        viewer: Option<UserId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedPostRecord>, FeedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PostRow, AuthorRow)> = posts::table
            .inner_join(users::table)
            .filter(posts::author_id.eq(owner.as_uuid()))
            .order_by(posts::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((PostRow::as_select(), AuthorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        annotate_page(&mut conn, rows, viewer)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for feed query error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(mapped, FeedRepositoryError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(mapped, FeedRepositoryError::Query { .. }));
    }
}
