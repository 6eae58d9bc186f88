//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Login upserts are keyed on the identity provider's subject so repeat
//! logins refresh the mutable profile fields in place. Nickname uniqueness is
//! enforced by the database and surfaced as a typed error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{IdentityClaims, UserRepository, UserRepositoryError};
use crate::domain::{Nickname, User, UserId};

use super::diesel_error_mapping::map_basic_pool_error;
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

/// Map Diesel errors, distinguishing nickname unique violations.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        if info
            .constraint_name()
            .is_some_and(|name| name.contains("nickname"))
        {
            return UserRepositoryError::nickname_taken();
        }
    }

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::from_uuid(row.id),
        external_id: row.external_id,
        email: row.email,
        display_name: row.display_name,
        nickname: row.nickname,
        picture_url: row.picture_url,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert_identity(
        &self,
        claims: &IdentityClaims,
    ) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            external_id: &claims.external_id,
            email: &claims.email,
            display_name: &claims.display_name,
            picture_url: claims.picture_url.as_deref(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::external_id)
            .do_update()
            .set((
                users::email.eq(excluded(users::email)),
                users::display_name.eq(excluded(users::display_name)),
                users::picture_url.eq(excluded(users::picture_url)),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_user(row))
    }

    async fn set_nickname(
        &self,
        id: UserId,
        nickname: &Nickname,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(users::table.find(id.as_uuid()))
            .set((
                users::nickname.eq(nickname.as_str()),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated_rows == 1)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
