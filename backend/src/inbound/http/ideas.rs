//! AI post-idea HTTP handler.
//!
//! ```text
//! POST /api/ai/generate-post-idea
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Optional topic hint steering the generated idea.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IdeaRequest {
    pub topic: Option<String>,
}

/// Generate a short post idea, optionally steered by a topic.
#[utoipa::path(
    post,
    path = "/api/ai/generate-post-idea",
    request_body = IdeaRequest,
    responses(
        (status = 200, description = "Generated text under the `idea` key"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Generation endpoint unavailable", body = ErrorSchema)
    ),
    tags = ["ai"],
    operation_id = "generatePostIdea"
)]
#[post("/ai/generate-post-idea")]
pub async fn generate_post_idea(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<IdeaRequest>>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let topic = payload.and_then(|body| body.into_inner().topic);
    let idea = state.ideas.generate_idea(topic).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "idea": idea })))
}
