//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{NewPost, PostHead, PostRecord, PostRepository, PostRepositoryError};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AuthorRow, NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert_post(&self, new_post: NewPost) -> Result<PostRecord, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let author: AuthorRow = users::table
            .find(new_post.author_id.as_uuid())
            .select(AuthorRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let new_row = NewPostRow {
            id: Uuid::new_v4(),
            author_id: new_post.author_id.as_uuid(),
            content: &new_post.content,
            image_url: new_post.image_url.as_deref(),
        };

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(PostRecord {
            id: row.id,
            author: author.into(),
            content: row.content,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<PostHead>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<(Uuid, Uuid)> = posts::table
            .find(post_id)
            .select((posts::id, posts::author_id))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(|(id, author_id)| PostHead {
            id,
            author_id: UserId::from_uuid(author_id),
        }))
    }

    async fn update_content(
        &self,
        post_id: Uuid,
        content: &str,
    ) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(posts::table.find(post_id))
            .set((
                posts::content.eq(content),
                posts::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(posts::table.find(post_id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
