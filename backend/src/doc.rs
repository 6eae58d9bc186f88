//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the JSON API: all HTTP paths from the inbound layer, the request DTOs and
//! read-model views they exchange, and the session cookie security scheme.
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{AuthorView, CommentView, NotificationView, PostView, UserView};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::engagement::CommentBody;
use crate::inbound::http::ideas::IdeaRequest;
use crate::inbound::http::notifications::MarkReadRequest;
use crate::inbound::http::posts::{CreatePostBody, UpdatePostBody};
use crate::inbound::http::profile::NicknameRequest;
use crate::inbound::http::schemas::ErrorSchema;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Social feed backend API",
        description = "HTTP interface for posts, engagement, follows, notifications and AI post ideas."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::profile::set_nickname,
        crate::inbound::http::profile::delete_account,
        crate::inbound::http::feed::get_feed,
        crate::inbound::http::feed::get_user_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::engagement::like_post,
        crate::inbound::http::engagement::unlike_post,
        crate::inbound::http::engagement::list_comments,
        crate::inbound::http::engagement::add_comment,
        crate::inbound::http::follows::follow_user,
        crate::inbound::http::follows::unfollow_user,
        crate::inbound::http::notifications::get_notifications,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::ideas::generate_post_idea,
    ),
    components(schemas(
        ErrorSchema,
        LoginRequest,
        NicknameRequest,
        CreatePostBody,
        UpdatePostBody,
        CommentBody,
        MarkReadRequest,
        IdeaRequest,
        AuthorView,
        PostView,
        CommentView,
        NotificationView,
        UserView,
    )),
    tags(
        (name = "auth", description = "Session establishment and teardown"),
        (name = "profile", description = "Profile edits and account deletion"),
        (name = "feed", description = "Feed and profile listings"),
        (name = "posts", description = "Post authoring"),
        (name = "engagement", description = "Likes and comments"),
        (name = "follows", description = "Follow graph"),
        (name = "notifications", description = "Unread notification inbox"),
        (name = "ai", description = "AI-assisted post ideas")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn openapi_registers_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for expected in [
            "/api/auth/login",
            "/api/auth/logout",
            "/api/profile/nickname",
            "/api/account",
            "/api/feed",
            "/api/users/{id}/posts",
            "/api/posts",
            "/api/posts/{id}/update",
            "/api/posts/{id}",
            "/api/posts/{id}/like",
            "/api/posts/{id}/comments",
            "/api/users/{id}/follow",
            "/api/notifications",
            "/api/notifications/mark-read",
            "/api/ai/generate-post-idea",
        ] {
            assert!(paths.contains_key(expected), "missing path: {expected}");
        }
    }

    #[test]
    fn openapi_registers_the_failure_envelope() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.schemas.contains_key("FailureEnvelope"));
    }
}
