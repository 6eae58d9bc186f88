//! Post authoring HTTP handlers.
//!
//! ```text
//! POST   /api/posts
//! POST   /api/posts/{id}/update
//! DELETE /api/posts/{id}
//! ```
//!
//! Edits arrive over POST rather than PUT to match the form-submission
//! clients this API serves.

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::CreatePostRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_uuid};

/// Request payload for creating a post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    pub content: Option<String>,
    pub image_url: Option<String>,
}

/// Request payload for replacing a post's content.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdatePostBody {
    pub content: Option<String>,
}

fn require_content(content: Option<String>) -> Result<String, Error> {
    content.ok_or_else(|| missing_field_error(FieldName::new("content")))
}

fn post_id_from(path: web::Path<String>) -> Result<uuid::Uuid, Error> {
    parse_uuid(&path.into_inner(), FieldName::new("postId"))
}

/// Create a post authored by the session user.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Created post under the `post` key"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let payload = payload.into_inner();
    let post = state
        .posts
        .create_post(CreatePostRequest {
            author,
            content: require_content(payload.content)?,
            image_url: payload.image_url,
        })
        .await?;
    Ok(HttpResponse::Created().json(json!({ "success": true, "post": post })))
}

/// Replace a post's content as its owner.
#[utoipa::path(
    post,
    path = "/api/posts/{id}/update",
    request_body = UpdatePostBody,
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated; `newContentHtml` carries the rendered body"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the post owner", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[post("/posts/{id}/update")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdatePostBody>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let post_id = post_id_from(path)?;
    let content = require_content(payload.into_inner().content)?;
    let new_content_html = state.posts.update_post(post_id, author, content).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "newContentHtml": new_content_html,
    })))
}

/// Delete a post as its owner.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Deleted; dependent likes and comments cascade away"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the post owner", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let post_id = post_id_from(path)?;
    state.posts.delete_post(post_id, author).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
