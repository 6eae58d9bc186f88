//! PostgreSQL-backed `FollowRepository` implementation using Diesel ORM.
//!
//! The follow insert owns its transactional unit: the conflict-ignoring
//! insert on the `(follower, following)` pair and the conditional `follow`
//! notification commit or roll back together.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{FollowOutcome, FollowRepository, FollowRepositoryError};
use crate::domain::{NotificationKind, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewFollowRow, NewNotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{follows, notifications, users};

/// Diesel-backed implementation of the `FollowRepository` port.
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FollowRepositoryError {
    map_basic_pool_error(error, FollowRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FollowRepositoryError {
    map_basic_diesel_error(
        error,
        FollowRepositoryError::query,
        FollowRepositoryError::connection,
    )
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn insert_follow(
        &self,
        follower: UserId,
        target: UserId,
    ) -> Result<FollowOutcome, FollowRepositoryError> {
        let follower_uuid = follower.as_uuid();
        let target_uuid = target.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let target_exists: Option<uuid::Uuid> = users::table
                    .find(target_uuid)
                    .select(users::id)
                    .first(conn)
                    .await
                    .optional()?;
                if target_exists.is_none() {
                    return Ok(FollowOutcome::TargetMissing);
                }

                let rows_affected = diesel::insert_into(follows::table)
                    .values(&NewFollowRow {
                        follower_id: follower_uuid,
                        following_id: target_uuid,
                    })
                    .on_conflict((follows::follower_id, follows::following_id))
                    .do_nothing()
                    .execute(conn)
                    .await?;

                // Only a freshly created edge notifies.
                if rows_affected == 1 {
                    diesel::insert_into(notifications::table)
                        .values(&NewNotificationRow {
                            recipient_id: target_uuid,
                            actor_id: follower_uuid,
                            kind: NotificationKind::Follow.as_str(),
                            post_id: None,
                        })
                        .execute(conn)
                        .await?;
                }

                Ok(FollowOutcome::Applied {
                    new_follow: rows_affected == 1,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_follow(
        &self,
        follower: UserId,
        target: UserId,
    ) -> Result<(), FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(follows::table.find((follower.as_uuid(), target.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
