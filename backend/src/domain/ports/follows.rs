//! Ports for the follow graph.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by follow repository adapters.
    pub enum FollowRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "follow repository query failed: {message}",
    }
}

/// Result of a follow transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// The transaction committed.
    Applied {
        /// True when a new follow row was created (as opposed to a
        /// duplicate request absorbed by the unique pair).
        new_follow: bool,
    },
    /// The target user does not exist; nothing was written.
    TargetMissing,
}

/// Driven port for follow rows.
///
/// `insert_follow` owns the transactional unit: conflict-ignoring insert on
/// the `(follower, following)` pair plus the conditional `follow`
/// notification, emitted only when a new row was created.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Idempotent follow insert with notification gate.
    async fn insert_follow(
        &self,
        follower: UserId,
        target: UserId,
    ) -> Result<FollowOutcome, FollowRepositoryError>;

    /// Idempotent follow delete; no notification.
    async fn delete_follow(
        &self,
        follower: UserId,
        target: UserId,
    ) -> Result<(), FollowRepositoryError>;
}

/// Follow state surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowState {
    /// Whether the caller now follows the target.
    pub is_following_now: bool,
}

/// Driving port for follow/unfollow use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowCommand: Send + Sync {
    /// Follow a user; self-follows are rejected before any write.
    async fn follow(&self, follower: UserId, target: UserId) -> Result<FollowState, Error>;

    /// Unfollow a user; a missing follow row is a silent no-op.
    async fn unfollow(&self, follower: UserId, target: UserId) -> Result<FollowState, Error>;
}
