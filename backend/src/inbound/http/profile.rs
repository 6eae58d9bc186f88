//! Profile HTTP handlers.
//!
//! ```text
//! POST   /api/profile/nickname
//! DELETE /api/account
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Request payload for setting the caller's nickname.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NicknameRequest {
    pub nickname: Option<String>,
}

/// Set the authenticated user's unique nickname.
#[utoipa::path(
    post,
    path = "/api/profile/nickname",
    request_body = NicknameRequest,
    responses(
        (status = 200, description = "Nickname set; payload carries the normalised form"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Nickname already taken", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "setNickname"
)]
#[post("/profile/nickname")]
pub async fn set_nickname(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NicknameRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let nickname = payload
        .into_inner()
        .nickname
        .ok_or_else(|| missing_field_error(FieldName::new("nickname")))?;
    let nickname = state.account.set_nickname(user_id, nickname).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "nickname": nickname })))
}

/// Delete the authenticated user's account and everything it owns.
#[utoipa::path(
    delete,
    path = "/api/account",
    responses(
        (status = 200, description = "Account deleted; session purged"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "deleteAccount"
)]
#[delete("/account")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.account.delete_account(user_id).await?;
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockAccountCommand;
    use crate::inbound::http::test_utils::{mock_ports, session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use mockall::predicate::eq;
    use serde_json::Value;
    use std::sync::Arc;

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn profile_app(
        account: MockAccountCommand,
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
        ports.account = Arc::new(account);
        App::new()
            .app_data(web::Data::new(crate::inbound::http::state::HttpState::new(
                ports,
            )))
            .wrap(test_session_middleware())
            .route(
                "/test/session/{id}",
                web::get().to(crate::inbound::http::test_utils::seed_session),
            )
            .service(
                web::scope("/api")
                    .service(set_nickname)
                    .service(delete_account),
            )
    }

    #[actix_web::test]
    async fn nickname_is_normalised_and_echoed() {
        let mut account = MockAccountCommand::new();
        account
            .expect_set_nickname()
            .withf(|_, nickname| nickname == "  Ada_99 ")
            .returning(|_, _| Ok("ada_99".to_owned()));
        let app = actix_test::init_service(profile_app(account)).await;
        let cookie = session_cookie(&app, USER_ID).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/profile/nickname")
            .cookie(cookie)
            .set_json(&NicknameRequest {
                nickname: Some("  Ada_99 ".to_owned()),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["nickname"], Value::from("ada_99"));
    }

    #[actix_web::test]
    async fn missing_nickname_is_rejected_before_the_port() {
        let app = actix_test::init_service(profile_app(MockAccountCommand::new())).await;
        let cookie = session_cookie(&app, USER_ID).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/profile/nickname")
            .cookie(cookie)
            .set_json(&NicknameRequest { nickname: None })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], Value::from("nickname"));
    }

    #[actix_web::test]
    async fn taken_nicknames_conflict() {
        let mut account = MockAccountCommand::new();
        account
            .expect_set_nickname()
            .returning(|_, _| Err(Error::conflict("nickname already taken")));
        let app = actix_test::init_service(profile_app(account)).await;
        let cookie = session_cookie(&app, USER_ID).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/profile/nickname")
            .cookie(cookie)
            .set_json(&NicknameRequest {
                nickname: Some("ada".to_owned()),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn delete_account_purges_the_session() {
        let user = crate::domain::UserId::parse(USER_ID).expect("fixture id");
        let mut account = MockAccountCommand::new();
        account
            .expect_delete_account()
            .with(eq(user))
            .returning(|_| Ok(()));
        let app = actix_test::init_service(profile_app(account)).await;
        let cookie = session_cookie(&app, USER_ID).await;

        let request = actix_test::TestRequest::delete()
            .uri("/api/account")
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
    }
}
