//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/auth/login
//! POST /api/auth/logout
//! ```
//!
//! The OAuth exchange happens outside this service; login receives
//! already-verified identity claims and only establishes the session.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::IdentityClaims;
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Verified identity claims submitted at login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub external_id: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub picture_url: Option<String>,
}

fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing_field_error(field)),
    }
}

fn parse_login_request(payload: LoginRequest) -> Result<IdentityClaims, Error> {
    Ok(IdentityClaims {
        external_id: require_text(payload.external_id, FieldName::new("externalId"))?,
        email: require_text(payload.email, FieldName::new("email"))?,
        display_name: require_text(payload.display_name, FieldName::new("displayName"))?,
        picture_url: payload.picture_url,
    })
}

/// Log in with verified identity claims and establish the session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session established"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let claims = parse_login_request(payload.into_inner())?;
    let user = state.account.login_with_identity(claims).await?;
    session.persist_user(UserId::from_uuid(user.id))?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}

/// Log out, purging the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
