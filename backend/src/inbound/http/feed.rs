//! Feed and profile listing HTTP handlers.
//!
//! ```text
//! GET /api/feed
//! GET /api/users/{id}/posts
//! ```
//!
//! Both endpoints work for anonymous viewers; a session only changes the
//! per-post `viewerLiked` flag.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::UserId;
use crate::domain::ports::FeedPage;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Raw pagination query parameters; clamped by [`FeedPage`].
#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FeedQueryParams {
    fn page(&self) -> FeedPage {
        FeedPage::new(self.limit, self.offset)
    }
}

/// Newest-first feed page across all authors.
#[utoipa::path(
    get,
    path = "/api/feed",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, clamped to 1..=50"),
        ("offset" = Option<i64>, Query, description = "Page start, non-negative")
    ),
    responses(
        (status = 200, description = "Feed page under the `posts` key"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "getFeed"
)]
#[get("/feed")]
pub async fn get_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FeedQueryParams>,
) -> ApiResult<HttpResponse> {
    let viewer = session.user_id()?;
    let posts = state.feed.list_feed(viewer, query.page()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "posts": posts })))
}

/// Newest-first page of one user's posts.
#[utoipa::path(
    get,
    path = "/api/users/{id}/posts",
    params(
        ("id" = String, Path, description = "Profile owner's user id"),
        ("limit" = Option<i64>, Query, description = "Page size, clamped to 1..=50"),
        ("offset" = Option<i64>, Query, description = "Page start, non-negative")
    ),
    responses(
        (status = 200, description = "Profile page under the `posts` key"),
        (status = 400, description = "Malformed user id", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "getUserPosts"
)]
#[get("/users/{id}/posts")]
pub async fn get_user_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<FeedQueryParams>,
) -> ApiResult<HttpResponse> {
    let owner = UserId::from_uuid(parse_uuid(&path.into_inner(), FieldName::new("userId"))?);
    let viewer = session.user_id()?;
    let posts = state
        .feed
        .list_user_posts(owner, viewer, query.page())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "posts": posts })))
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
