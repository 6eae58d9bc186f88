//! PostgreSQL-backed `NotificationRepository` implementation using Diesel ORM.
//!
//! Mark-read deletes rows; the listing pairs an unread count with the newest
//! unread page so clients render a badge and a dropdown from one response.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{
    NotificationRecord, NotificationRepository, NotificationRepositoryError, UnreadSnapshot,
};
use crate::domain::{NotificationKind, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AuthorRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{notifications, users};

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotificationRepositoryError {
    map_basic_pool_error(error, NotificationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NotificationRepositoryError {
    map_basic_diesel_error(
        error,
        NotificationRepositoryError::query,
        NotificationRepositoryError::connection,
    )
}

/// Convert a joined row, skipping rows whose kind is not recognised.
fn row_to_record(row: NotificationRow, actor: AuthorRow) -> Option<NotificationRecord> {
    let kind: NotificationKind = match row.kind.parse() {
        Ok(kind) => kind,
        Err(_) => {
            warn!(
                id = row.id,
                kind = %row.kind,
                "unrecognised notification kind, skipping row"
            );
            return None;
        }
    };
    Some(NotificationRecord {
        id: row.id,
        kind,
        actor: actor.into(),
        post_id: row.post_id,
        created_at: row.created_at,
    })
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn list_unread(
        &self,
        recipient: UserId,
        limit: i64,
    ) -> Result<UnreadSnapshot, NotificationRepositoryError> {
        let recipient_uuid = recipient.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let unread_count: i64 = notifications::table
            .filter(notifications::recipient_id.eq(recipient_uuid))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<(NotificationRow, AuthorRow)> = notifications::table
            .inner_join(users::table.on(users::id.eq(notifications::actor_id)))
            .filter(notifications::recipient_id.eq(recipient_uuid))
            .filter(notifications::is_read.eq(false))
            .order_by(notifications::created_at.desc())
            .limit(limit)
            .select((NotificationRow::as_select(), AuthorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(UnreadSnapshot {
            unread_count,
            notifications: rows
                .into_iter()
                .filter_map(|(row, actor)| row_to_record(row, actor))
                .collect(),
        })
    }

    async fn delete_unread(
        &self,
        recipient: UserId,
        ids: &[i64],
    ) -> Result<u64, NotificationRepositoryError> {
        let recipient_uuid = recipient.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The recipient filter scopes deletion to the caller's own rows, so
        // foreign ids in the list simply match nothing.
        let deleted = if ids.is_empty() {
            diesel::delete(
                notifications::table
                    .filter(notifications::recipient_id.eq(recipient_uuid))
                    .filter(notifications::is_read.eq(false)),
            )
            .execute(&mut conn)
            .await
        } else {
            diesel::delete(
                notifications::table
                    .filter(notifications::recipient_id.eq(recipient_uuid))
                    .filter(notifications::is_read.eq(false))
                    .filter(notifications::id.eq_any(ids)),
            )
            .execute(&mut conn)
            .await
        }
        .map_err(map_diesel_error)?;

        Ok(deleted as u64)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for notification row conversion.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn actor() -> AuthorRow {
        AuthorRow {
            id: Uuid::from_u128(1),
            display_name: "Ada".into(),
            nickname: None,
            picture_url: None,
        }
    }

    fn row(kind: &str) -> NotificationRow {
        NotificationRow {
            id: 7,
            recipient_id: Uuid::from_u128(2),
            actor_id: Uuid::from_u128(1),
            kind: kind.into(),
            post_id: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("like", NotificationKind::Like)]
    #[case("follow", NotificationKind::Follow)]
    fn known_kinds_convert(#[case] raw: &str, #[case] expected: NotificationKind) {
        let record = row_to_record(row(raw), actor()).unwrap();
        assert_eq!(record.kind, expected);
        assert_eq!(record.id, 7);
    }

    #[rstest]
    fn unknown_kind_is_skipped() {
        assert!(row_to_record(row("mention"), actor()).is_none());
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            mapped,
            NotificationRepositoryError::Connection { .. }
        ));
    }
}
