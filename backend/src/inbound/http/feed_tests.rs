//! Tests for feed and profile listing handlers.

use super::*;
use crate::domain::UserId;
use crate::domain::ports::{AuthorView, MockFeedQuery, PostView};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{
    mock_ports, seed_session, session_cookie, test_session_middleware,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const VIEWER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const OWNER_ID: &str = "00000000-0000-0000-0000-000000000002";

fn feed_post(viewer_liked: bool) -> PostView {
    PostView {
        id: Uuid::new_v4(),
        author: AuthorView {
            id: Uuid::parse_str(OWNER_ID).expect("fixture id"),
            display_name: "Grace".to_owned(),
            nickname: Some("grace".to_owned()),
            picture_url: None,
        },
        content: "hello".to_owned(),
        image_url: None,
        like_count: 3,
        comment_count: 1,
        viewer_liked,
        created_at: Utc::now(),
        relative_age: "0 sec ago".to_owned(),
    }
}

fn feed_app(
    feed: MockFeedQuery,
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
    ports.feed = Arc::new(feed);
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .wrap(test_session_middleware())
        .route("/test/session/{id}", web::get().to(seed_session))
        .service(
            web::scope("/api")
                .service(get_feed)
                .service(get_user_posts),
        )
}

#[actix_web::test]
async fn anonymous_feed_passes_no_viewer() {
    let mut feed = MockFeedQuery::new();
    feed.expect_list_feed()
        .withf(|viewer, page| viewer.is_none() && page.limit() == 20 && page.offset() == 0)
        .returning(|_, _| Ok(vec![feed_post(false)]));
    let app = actix_test::init_service(feed_app(feed)).await;

    let request = actix_test::TestRequest::get().uri("/api/feed").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["posts"][0]["viewerLiked"], Value::Bool(false));
    assert_eq!(body["posts"][0]["author"]["displayName"], "Grace");
}

#[actix_web::test]
async fn logged_in_feed_forwards_the_viewer_and_window() {
    let viewer = UserId::parse(VIEWER_ID).expect("fixture id");
    let mut feed = MockFeedQuery::new();
    feed.expect_list_feed()
        .withf(move |observed, page| {
            *observed == Some(viewer) && page.limit() == 5 && page.offset() == 10
        })
        .returning(|_, _| Ok(vec![feed_post(true)]));
    let app = actix_test::init_service(feed_app(feed)).await;
    let cookie = session_cookie(&app, VIEWER_ID).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/feed?limit=5&offset=10")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["posts"][0]["viewerLiked"], Value::Bool(true));
}

#[actix_web::test]
async fn user_posts_parse_the_owner_id() {
    let owner = UserId::parse(OWNER_ID).expect("fixture id");
    let mut feed = MockFeedQuery::new();
    feed.expect_list_user_posts()
        .withf(move |observed, viewer, _| *observed == owner && viewer.is_none())
        .returning(|_, _, _| Ok(Vec::new()));
    let app = actix_test::init_service(feed_app(feed)).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{OWNER_ID}/posts"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["posts"], Value::Array(Vec::new()));
}

#[actix_web::test]
async fn malformed_owner_ids_are_rejected() {
    let app = actix_test::init_service(feed_app(MockFeedQuery::new())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/users/not-a-uuid/posts")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], Value::from("userId"));
}
