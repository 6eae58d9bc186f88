//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::domain::ports::{
    MockAccountCommand, MockCommentQuery, MockEngagementCommand, MockFeedQuery, MockFollowCommand,
    MockIdeaGeneration, MockNotifications, MockPostCommand,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpStatePorts;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports bundle backed entirely by unexpectant mocks.
///
/// Tests replace the field under test with a configured mock; any call on
/// the remaining ports panics, which is the point.
pub fn mock_ports() -> HttpStatePorts {
    HttpStatePorts {
        account: Arc::new(MockAccountCommand::new()),
        posts: Arc::new(MockPostCommand::new()),
        engagement: Arc::new(MockEngagementCommand::new()),
        comments: Arc::new(MockCommentQuery::new()),
        follows: Arc::new(MockFollowCommand::new()),
        notifications: Arc::new(MockNotifications::new()),
        feed: Arc::new(MockFeedQuery::new()),
        ideas: Arc::new(MockIdeaGeneration::new()),
    }
}

/// Route handler persisting the path user id into the session.
///
/// Register under `/test/session/{id}` to seed authenticated requests.
pub async fn seed_session(
    path: web::Path<String>,
    session: SessionContext,
) -> Result<HttpResponse, Error> {
    let user_id = UserId::parse(&path.into_inner())
        .map_err(|error| Error::internal(format!("fixture user id: {error}")))?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Fetch a session cookie for the given user id via the seeding route.
pub async fn session_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    user_id: &str,
) -> Cookie<'static> {
    let request = actix_web::test::TestRequest::get()
        .uri(&format!("/test/session/{user_id}"))
        .to_request();
    let response = actix_web::test::call_service(app, request).await;
    assert!(response.status().is_success());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
