//! Notification inbox HTTP handlers.
//!
//! ```text
//! GET  /api/notifications
//! POST /api/notifications/mark-read
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for acknowledging notifications.
///
/// An absent or empty `ids` list acknowledges every unread notification.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MarkReadRequest {
    pub ids: Option<Vec<i64>>,
}

/// The caller's unread count plus the newest unread notifications.
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "`unread_count` and `notifications` for the caller"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "getNotifications"
)]
#[get("/notifications")]
pub async fn get_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let unread = state.notifications.list_unread(user).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "unread_count": unread.unread_count,
        "notifications": unread.notifications,
    })))
}

/// Acknowledge notifications; acknowledged rows are deleted.
#[utoipa::path(
    post,
    path = "/api/notifications/mark-read",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "`deleted_count` of acknowledged notifications"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationsRead"
)]
#[post("/notifications/mark-read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<MarkReadRequest>>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let ids = payload
        .and_then(|body| body.into_inner().ids)
        .unwrap_or_default();
    let deleted = state.notifications.mark_read(user, ids).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "deleted_count": deleted,
        "message": format!("marked {deleted} notifications as read"),
    })))
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
