//! Domain ports: driving use-case traits and driven repository traits.
//!
//! Driving ports return `Result<_, domain::Error>` and are what HTTP
//! handlers depend on; driven ports return per-port error enums and are what
//! the outbound adapters implement.

mod macros;

pub mod account;
pub mod engagement;
pub mod feed;
pub mod follows;
pub mod notifications;
pub mod posts;
pub mod textgen;
pub mod views;

pub(crate) use macros::define_port_error;

pub use account::{AccountCommand, IdentityClaims, UserRepository, UserRepositoryError};
pub use engagement::{
    CommentAdded, CommentOutcome, CommentQuery, CommentRecord, EngagementCommand,
    EngagementRepository, EngagementRepositoryError, LikeOutcome, LikeResponse, LikeState,
};
pub use feed::{
    DEFAULT_FEED_LIMIT, FeedPage, FeedPostRecord, FeedQuery, FeedRepository, FeedRepositoryError,
    MAX_FEED_LIMIT,
};
pub use follows::{
    FollowCommand, FollowOutcome, FollowRepository, FollowRepositoryError, FollowState,
};
pub use notifications::{
    NotificationRecord, NotificationRepository, NotificationRepositoryError, Notifications,
    UnreadNotifications, UnreadSnapshot,
};
pub use posts::{
    CreatePostRequest, NewPost, PostCommand, PostHead, PostRecord, PostRepository,
    PostRepositoryError,
};
pub use textgen::{IdeaGeneration, TextGenerator, TextGeneratorError};
pub use views::{AuthorRecord, AuthorView, CommentView, NotificationView, PostView, UserView};

#[cfg(test)]
pub use account::{MockAccountCommand, MockUserRepository};
#[cfg(test)]
pub use engagement::{MockCommentQuery, MockEngagementCommand, MockEngagementRepository};
#[cfg(test)]
pub use feed::{MockFeedQuery, MockFeedRepository};
#[cfg(test)]
pub use follows::{MockFollowCommand, MockFollowRepository};
#[cfg(test)]
pub use notifications::{MockNotificationRepository, MockNotifications};
#[cfg(test)]
pub use posts::{MockPostCommand, MockPostRepository};
#[cfg(test)]
pub use textgen::{MockIdeaGeneration, MockTextGenerator};
