//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed entities with validated constructors, the
//! port traits the adapters implement, and the services that carry the
//! use-case rules. Invariants and serialisation contracts (serde) are
//! documented on each type.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — API error payload with a stable code.
//! - `User`, `UserId`, `Nickname` — identity and profile primitives.
//! - `PostContent`, `CommentContent` — validated bodies.
//! - `NotificationKind` — event categories for the inbox.
//! - `ports` — driving and driven traits plus read-model types.
//! - The `*Service` types implementing the driving ports.

pub mod error;
pub mod user;

pub mod comment;
pub mod notification;
pub mod post;
pub mod relative_age;

pub mod ports;

mod account_service;
mod engagement_service;
mod feed_service;
mod follow_service;
mod idea_service;
mod notification_service;
mod post_service;

pub use self::account_service::AccountService;
pub use self::comment::{CommentContent, CommentContentError, MAX_COMMENT_CHARS};
pub use self::engagement_service::EngagementService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed_service::FeedService;
pub use self::follow_service::FollowService;
pub use self::idea_service::IdeaService;
pub use self::notification::{NotificationKind, UnknownNotificationKind};
pub use self::notification_service::{NotificationService, UNREAD_PAGE_LIMIT};
pub use self::post::{MAX_POST_CONTENT_CHARS, PostContent, PostContentError};
pub use self::post_service::PostService;
pub use self::relative_age::format_relative_age;
pub use self::user::{Nickname, NicknameValidationError, User, UserId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
