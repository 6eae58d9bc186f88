//! Like and comment HTTP handlers.
//!
//! ```text
//! POST   /api/posts/{id}/like
//! DELETE /api/posts/{id}/like
//! GET    /api/posts/{id}/comments
//! POST   /api/posts/{id}/comments
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::LikeResponse;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_uuid};

/// Request payload for adding a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentBody {
    pub content: Option<String>,
}

fn post_id_from(path: web::Path<String>) -> Result<uuid::Uuid, Error> {
    parse_uuid(&path.into_inner(), FieldName::new("postId"))
}

fn like_body(like: LikeResponse) -> serde_json::Value {
    json!({
        "success": true,
        "newLikeCount": like.new_like_count,
        "userLiked": like.user_liked,
    })
}

/// Like a post; duplicate likes are silent no-ops.
#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Authoritative `newLikeCount` and `userLiked`"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "likePost"
)]
#[post("/posts/{id}/like")]
pub async fn like_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let post_id = post_id_from(path)?;
    let like = state.engagement.like_post(post_id, user).await?;
    Ok(HttpResponse::Ok().json(like_body(like)))
}

/// Remove a like; a missing like is a silent no-op.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}/like",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Authoritative `newLikeCount` and `userLiked`"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "unlikePost"
)]
#[delete("/posts/{id}/like")]
pub async fn unlike_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let post_id = post_id_from(path)?;
    let like = state.engagement.unlike_post(post_id, user).await?;
    Ok(HttpResponse::Ok().json(like_body(like)))
}

/// List a post's comments, oldest first.
#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments under the `comments` key; empty for unknown posts"),
        (status = 400, description = "Malformed post id", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "listComments"
)]
#[get("/posts/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let post_id = post_id_from(path)?;
    let comments = state.comments.list_comments(post_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "comments": comments })))
}

/// Comment on a post.
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    request_body = CommentBody,
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 201, description = "Created `comment` plus `newCommentCount`"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "addComment"
)]
#[post("/posts/{id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CommentBody>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let post_id = post_id_from(path)?;
    let content = payload
        .into_inner()
        .content
        .ok_or_else(|| missing_field_error(FieldName::new("content")))?;
    let added = state.engagement.add_comment(post_id, user, content).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "comment": added.comment,
        "newCommentCount": added.new_comment_count,
    })))
}

#[cfg(test)]
#[path = "engagement_tests.rs"]
mod tests;
