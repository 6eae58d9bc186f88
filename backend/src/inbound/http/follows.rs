//! Follow graph HTTP handlers.
//!
//! ```text
//! POST   /api/users/{id}/follow
//! DELETE /api/users/{id}/follow
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde_json::json;

use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

fn target_from(path: web::Path<String>) -> Result<UserId, Error> {
    Ok(UserId::from_uuid(parse_uuid(
        &path.into_inner(),
        FieldName::new("userId"),
    )?))
}

/// Follow a user.
#[utoipa::path(
    post,
    path = "/api/users/{id}/follow",
    params(("id" = String, Path, description = "Target user id")),
    responses(
        (status = 200, description = "Resulting `isFollowingNow` state"),
        (status = 400, description = "Self-follow or malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Target user not found", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "followUser"
)]
#[post("/users/{id}/follow")]
pub async fn follow_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let follower = session.require_user_id()?;
    let target = target_from(path)?;
    let follow = state.follows.follow(follower, target).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "isFollowingNow": follow.is_following_now,
    })))
}

/// Unfollow a user; a missing follow row is a silent no-op.
#[utoipa::path(
    delete,
    path = "/api/users/{id}/follow",
    params(("id" = String, Path, description = "Target user id")),
    responses(
        (status = 200, description = "Resulting `isFollowingNow` state"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "unfollowUser"
)]
#[delete("/users/{id}/follow")]
pub async fn unfollow_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let follower = session.require_user_id()?;
    let target = target_from(path)?;
    let follow = state.follows.unfollow(follower, target).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "isFollowingNow": follow.is_following_now,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FollowState, MockFollowCommand};
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{
        mock_ports, seed_session, session_cookie, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;
    use std::sync::Arc;

    const FOLLOWER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const TARGET_ID: &str = "00000000-0000-0000-0000-000000000002";

    fn follow_app(
        follows: MockFollowCommand,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut ports = mock_ports();
        ports.follows = Arc::new(follows);
        App::new()
            .app_data(web::Data::new(HttpState::new(ports)))
            .wrap(test_session_middleware())
            .route("/test/session/{id}", web::get().to(seed_session))
            .service(
                web::scope("/api")
                    .service(follow_user)
                    .service(unfollow_user),
            )
    }

    #[actix_web::test]
    async fn follow_reports_the_resulting_state() {
        let follower = UserId::parse(FOLLOWER_ID).expect("fixture id");
        let target = UserId::parse(TARGET_ID).expect("fixture id");
        let mut follows = MockFollowCommand::new();
        follows
            .expect_follow()
            .withf(move |observed_follower, observed_target| {
                *observed_follower == follower && *observed_target == target
            })
            .returning(|_, _| {
                Ok(FollowState {
                    is_following_now: true,
                })
            });
        let app = actix_test::init_service(follow_app(follows)).await;
        let cookie = session_cookie(&app, FOLLOWER_ID).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/users/{TARGET_ID}/follow"))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["isFollowingNow"], Value::Bool(true));
    }

    #[actix_web::test]
    async fn self_follow_is_rejected() {
        let mut follows = MockFollowCommand::new();
        follows.expect_follow().returning(|_, _| {
            Err(crate::domain::Error::invalid_request(
                "users cannot follow themselves",
            ))
        });
        let app = actix_test::init_service(follow_app(follows)).await;
        let cookie = session_cookie(&app, FOLLOWER_ID).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/users/{FOLLOWER_ID}/follow"))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unfollow_reports_not_following() {
        let mut follows = MockFollowCommand::new();
        follows.expect_unfollow().returning(|_, _| {
            Ok(FollowState {
                is_following_now: false,
            })
        });
        let app = actix_test::init_service(follow_app(follows)).await;
        let cookie = session_cookie(&app, FOLLOWER_ID).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/users/{TARGET_ID}/follow"))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["isFollowingNow"], Value::Bool(false));
    }

    #[actix_web::test]
    async fn follow_requires_a_session() {
        let app = actix_test::init_service(follow_app(MockFollowCommand::new())).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/users/{TARGET_ID}/follow"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
