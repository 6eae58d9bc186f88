//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, CommentQuery, EngagementCommand, FeedQuery, FollowCommand, IdeaGeneration,
    Notifications, PostCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub account: Arc<dyn AccountCommand>,
    pub posts: Arc<dyn PostCommand>,
    pub engagement: Arc<dyn EngagementCommand>,
    pub comments: Arc<dyn CommentQuery>,
    pub follows: Arc<dyn FollowCommand>,
    pub notifications: Arc<dyn Notifications>,
    pub feed: Arc<dyn FeedQuery>,
    pub ideas: Arc<dyn IdeaGeneration>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub account: Arc<dyn AccountCommand>,
    pub posts: Arc<dyn PostCommand>,
    pub engagement: Arc<dyn EngagementCommand>,
    pub comments: Arc<dyn CommentQuery>,
    pub follows: Arc<dyn FollowCommand>,
    pub notifications: Arc<dyn Notifications>,
    pub feed: Arc<dyn FeedQuery>,
    pub ideas: Arc<dyn IdeaGeneration>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            account,
            posts,
            engagement,
            comments,
            follows,
            notifications,
            feed,
            ideas,
        } = ports;
        Self {
            account,
            posts,
            engagement,
            comments,
            follows,
            notifications,
            feed,
            ideas,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
