//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, TextGenSettings};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    AccountService, EngagementService, FeedService, FollowService, IdeaService,
    NotificationService, PostService,
};
use crate::inbound::http::auth::{login, logout};
use crate::inbound::http::engagement::{add_comment, like_post, list_comments, unlike_post};
use crate::inbound::http::feed::{get_feed, get_user_posts};
use crate::inbound::http::follows::{follow_user, unfollow_user};
use crate::inbound::http::ideas::generate_post_idea;
use crate::inbound::http::notifications::{get_notifications, mark_read};
use crate::inbound::http::posts::{create_post, delete_post, update_post};
use crate::inbound::http::profile::{delete_account, set_nickname};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::{
    DbPool, DieselEngagementRepository, DieselFeedQuery, DieselFollowRepository,
    DieselNotificationRepository, DieselPostRepository, DieselUserRepository,
};
use crate::outbound::textgen::HttpTextGenerator;

/// Wire pool-backed adapters into domain services and bundle them for handlers.
fn build_http_state(pool: &DbPool, textgen: &TextGenSettings) -> std::io::Result<HttpState> {
    let generator = HttpTextGenerator::new(textgen.endpoint.clone(), textgen.api_key.clone())
        .map_err(|error| std::io::Error::other(format!("text generation client: {error}")))?;
    let engagement = Arc::new(EngagementService::new(Arc::new(
        DieselEngagementRepository::new(pool.clone()),
    )));

    Ok(HttpState::new(HttpStatePorts {
        account: Arc::new(AccountService::new(Arc::new(DieselUserRepository::new(
            pool.clone(),
        )))),
        posts: Arc::new(PostService::new(Arc::new(DieselPostRepository::new(
            pool.clone(),
        )))),
        engagement: engagement.clone(),
        comments: engagement,
        follows: Arc::new(FollowService::new(Arc::new(DieselFollowRepository::new(
            pool.clone(),
        )))),
        notifications: Arc::new(NotificationService::new(Arc::new(
            DieselNotificationRepository::new(pool.clone()),
        ))),
        feed: Arc::new(FeedService::new(Arc::new(DieselFeedQuery::new(
            pool.clone(),
        )))),
        ideas: Arc::new(IdeaService::new(Arc::new(generator))),
    }))
}

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(set_nickname)
        .service(delete_account)
        .service(get_feed)
        .service(get_user_posts)
        .service(create_post)
        .service(update_post)
        .service(delete_post)
        .service(like_post)
        .service(unlike_post)
        .service(list_comments)
        .service(add_comment)
        .service(follow_user)
        .service(unfollow_user)
        .service(get_notifications)
        .service(mark_read)
        .service(generate_post_idea);

    let app = App::new().app_data(http_state).wrap(Trace).service(api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the outbound HTTP client cannot be
/// built or binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        db_pool,
        textgen,
    } = config;

    let http_state = web::Data::new(build_http_state(&db_pool, &textgen)?);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
