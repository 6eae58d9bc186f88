//! Follow graph domain service.
//!
//! The self-follow rule is enforced here, before any write; duplicate
//! follows are absorbed by the repository's unique pair.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    FollowCommand, FollowOutcome, FollowRepository, FollowRepositoryError, FollowState,
};
use crate::domain::{Error, UserId};

/// Follow service implementing the driving port.
#[derive(Clone)]
pub struct FollowService<F> {
    follows: Arc<F>,
}

impl<F> FollowService<F> {
    /// Create a new service over a follow repository.
    pub fn new(follows: Arc<F>) -> Self {
        Self { follows }
    }
}

fn map_repository_error(error: FollowRepositoryError) -> Error {
    match error {
        FollowRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("follow repository unavailable: {message}"))
        }
        FollowRepositoryError::Query { message } => {
            Error::internal(format!("follow repository error: {message}"))
        }
    }
}

#[async_trait]
impl<F> FollowCommand for FollowService<F>
where
    F: FollowRepository,
{
    async fn follow(&self, follower: UserId, target: UserId) -> Result<FollowState, Error> {
        if follower == target {
            return Err(
                Error::invalid_request("users cannot follow themselves").with_details(json!({
                    "field": "userId",
                    "code": "self_follow",
                })),
            );
        }
        let outcome = self
            .follows
            .insert_follow(follower, target)
            .await
            .map_err(map_repository_error)?;
        match outcome {
            FollowOutcome::Applied { .. } => Ok(FollowState {
                is_following_now: true,
            }),
            FollowOutcome::TargetMissing => Err(Error::not_found("user not found")),
        }
    }

    async fn unfollow(&self, follower: UserId, target: UserId) -> Result<FollowState, Error> {
        self.follows
            .delete_follow(follower, target)
            .await
            .map_err(map_repository_error)?;
        Ok(FollowState {
            is_following_now: false,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Self-follow rejection and outcome mapping.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockFollowRepository;
    use uuid::Uuid;

    fn users() -> (UserId, UserId) {
        (
            UserId::from_uuid(Uuid::from_u128(20)),
            UserId::from_uuid(Uuid::from_u128(21)),
        )
    }

    #[tokio::test]
    async fn self_follow_is_rejected_without_touching_the_repository() {
        let (user, _) = users();
        let mut repo = MockFollowRepository::new();
        repo.expect_insert_follow().never();

        let service = FollowService::new(Arc::new(repo));
        let err = service.follow(user, user).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn following_a_missing_user_is_not_found() {
        let (follower, target) = users();
        let mut repo = MockFollowRepository::new();
        repo.expect_insert_follow()
            .returning(|_, _| Ok(FollowOutcome::TargetMissing));

        let service = FollowService::new(Arc::new(repo));
        let err = service.follow(follower, target).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn duplicate_follow_still_reports_following() {
        let (follower, target) = users();
        let mut repo = MockFollowRepository::new();
        repo.expect_insert_follow()
            .returning(|_, _| Ok(FollowOutcome::Applied { new_follow: false }));

        let service = FollowService::new(Arc::new(repo));
        let state = service.follow(follower, target).await.unwrap();
        assert!(state.is_following_now);
    }

    #[tokio::test]
    async fn unfollow_is_always_not_following() {
        let (follower, target) = users();
        let mut repo = MockFollowRepository::new();
        repo.expect_delete_follow().returning(|_, _| Ok(()));

        let service = FollowService::new(Arc::new(repo));
        let state = service.unfollow(follower, target).await.unwrap();
        assert!(!state.is_following_now);
    }
}
