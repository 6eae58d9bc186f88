//! PostgreSQL-backed `EngagementRepository` implementation using Diesel ORM.
//!
//! Like and comment mutations run inside a single transaction: the
//! conflict-ignoring write, the authoritative recount and the conditional
//! notification insert commit or roll back together. The notification gate is
//! the affected-row count of the like insert, so concurrent duplicate likes
//! produce at most one notification.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{
    CommentOutcome, CommentRecord, EngagementRepository, EngagementRepositoryError, LikeOutcome,
    LikeState,
};
use crate::domain::{NotificationKind, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AuthorRow, CommentRow, NewCommentRow, NewLikeRow, NewNotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, likes, notifications, posts, users};

/// Diesel-backed implementation of the `EngagementRepository` port.
#[derive(Clone)]
pub struct DieselEngagementRepository {
    pool: DbPool,
}

impl DieselEngagementRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EngagementRepositoryError {
    map_basic_pool_error(error, EngagementRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EngagementRepositoryError {
    map_basic_diesel_error(
        error,
        EngagementRepositoryError::query,
        EngagementRepositoryError::connection,
    )
}

/// Author of a post, `None` when the post row is gone.
async fn find_post_author<C>(conn: &mut C, post_id: Uuid) -> Result<Option<Uuid>, diesel::result::Error>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    posts::table
        .find(post_id)
        .select(posts::author_id)
        .first(conn)
        .await
        .optional()
}

async fn count_likes<C>(conn: &mut C, post_id: Uuid) -> Result<i64, diesel::result::Error>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    likes::table
        .filter(likes::post_id.eq(post_id))
        .count()
        .get_result(conn)
        .await
}

#[async_trait]
impl EngagementRepository for DieselEngagementRepository {
    async fn insert_like(
        &self,
        post_id: Uuid,
        user_id: UserId,
    ) -> Result<LikeOutcome, EngagementRepositoryError> {
        let user_uuid = user_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let Some(author_id) = find_post_author(conn, post_id).await? else {
                    return Ok(LikeOutcome::PostMissing);
                };

                let rows_affected = diesel::insert_into(likes::table)
                    .values(&NewLikeRow {
                        user_id: user_uuid,
                        post_id,
                    })
                    .on_conflict((likes::user_id, likes::post_id))
                    .do_nothing()
                    .execute(conn)
                    .await?;

                // Only a freshly created like notifies, and never for the
                // author liking their own post.
                if rows_affected == 1 && author_id != user_uuid {
                    diesel::insert_into(notifications::table)
                        .values(&NewNotificationRow {
                            recipient_id: author_id,
                            actor_id: user_uuid,
                            kind: NotificationKind::Like.as_str(),
                            post_id: Some(post_id),
                        })
                        .execute(conn)
                        .await?;
                }

                let like_count = count_likes(conn, post_id).await?;
                Ok(LikeOutcome::Applied(LikeState {
                    like_count,
                    viewer_liked: true,
                }))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_like(
        &self,
        post_id: Uuid,
        user_id: UserId,
    ) -> Result<LikeOutcome, EngagementRepositoryError> {
        let user_uuid = user_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                if find_post_author(conn, post_id).await?.is_none() {
                    return Ok(LikeOutcome::PostMissing);
                }

                diesel::delete(likes::table.find((user_uuid, post_id)))
                    .execute(conn)
                    .await?;

                let like_count = count_likes(conn, post_id).await?;
                Ok(LikeOutcome::Applied(LikeState {
                    like_count,
                    viewer_liked: false,
                }))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn insert_comment(
        &self,
        post_id: Uuid,
        author_id: UserId,
        content: &str,
    ) -> Result<CommentOutcome, EngagementRepositoryError> {
        let author_uuid = author_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                if find_post_author(conn, post_id).await?.is_none() {
                    return Ok(CommentOutcome::PostMissing);
                }

                let author: AuthorRow = users::table
                    .find(author_uuid)
                    .select(AuthorRow::as_select())
                    .first(conn)
                    .await?;

                let row: CommentRow = diesel::insert_into(comments::table)
                    .values(&NewCommentRow {
                        id: Uuid::new_v4(),
                        post_id,
                        author_id: author_uuid,
                        content,
                    })
                    .returning(CommentRow::as_returning())
                    .get_result(conn)
                    .await?;

                let comment_count: i64 = comments::table
                    .filter(comments::post_id.eq(post_id))
                    .count()
                    .get_result(conn)
                    .await?;

                Ok(CommentOutcome::Applied {
                    comment: CommentRecord {
                        id: row.id,
                        post_id: row.post_id,
                        author: author.into(),
                        content: row.content,
                        created_at: row.created_at,
                    },
                    comment_count,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_comments(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentRecord>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CommentRow, AuthorRow)> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id))
            .order_by(comments::created_at.asc())
            .select((CommentRow::as_select(), AuthorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentRecord {
                id: comment.id,
                post_id: comment.post_id,
                author: author.into(),
                content: comment.content,
                created_at: comment.created_at,
            })
            .collect())
    }
}
