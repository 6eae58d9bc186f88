//! Account lifecycle domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    AccountCommand, IdentityClaims, UserRepository, UserRepositoryError, UserView,
};
use crate::domain::{Error, Nickname, NicknameValidationError, User, UserId};

/// Account service implementing the driving port.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service over a user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::NicknameTaken {} => {
            Error::conflict("nickname already taken").with_details(json!({
                "field": "nickname",
                "code": "nickname_taken",
            }))
        }
    }
}

fn map_nickname_error(error: &NicknameValidationError) -> Error {
    let code = match error {
        NicknameValidationError::Empty => "empty_nickname",
        NicknameValidationError::TooShort => "nickname_too_short",
        NicknameValidationError::TooLong => "nickname_too_long",
        NicknameValidationError::InvalidCharacters => "nickname_invalid_characters",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "nickname",
        "code": code,
    }))
}

fn user_view(user: User) -> UserView {
    UserView {
        id: user.id.as_uuid(),
        email: user.email,
        display_name: user.display_name,
        nickname: user.nickname,
        picture_url: user.picture_url,
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn login_with_identity(&self, claims: IdentityClaims) -> Result<UserView, Error> {
        let user = self
            .users
            .upsert_identity(&claims)
            .await
            .map_err(map_repository_error)?;
        Ok(user_view(user))
    }

    async fn set_nickname(&self, user: UserId, nickname: String) -> Result<String, Error> {
        let nickname = Nickname::parse(&nickname).map_err(|err| map_nickname_error(&err))?;
        let updated = self
            .users
            .set_nickname(user, &nickname)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found("user not found"));
        }
        Ok(nickname.as_str().to_owned())
    }

    async fn delete_account(&self, user: UserId) -> Result<(), Error> {
        self.users
            .delete_user(user)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Nickname validation and identity upsert behaviour.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn caller() -> UserId {
        UserId::from_uuid(Uuid::from_u128(50))
    }

    fn stored_user(nickname: Option<&str>) -> User {
        User {
            id: caller(),
            external_id: "idp|50".into(),
            email: "ada@example.com".into(),
            display_name: "Ada".into(),
            nickname: nickname.map(str::to_owned),
            picture_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn login_returns_the_upserted_profile() {
        let mut repo = MockUserRepository::new();
        repo.expect_upsert_identity()
            .withf(|claims| claims.external_id == "idp|50")
            .returning(|_| Ok(stored_user(Some("ada"))));

        let service = AccountService::new(Arc::new(repo));
        let view = service
            .login_with_identity(IdentityClaims {
                external_id: "idp|50".into(),
                email: "ada@example.com".into(),
                display_name: "Ada".into(),
                picture_url: None,
            })
            .await
            .unwrap();
        assert_eq!(view.nickname.as_deref(), Some("ada"));
        assert_eq!(view.id, caller().as_uuid());
    }

    #[tokio::test]
    async fn invalid_nickname_never_reaches_the_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_nickname().never();

        let service = AccountService::new(Arc::new(repo));
        let err = service
            .set_nickname(caller(), "spaced out".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn nickname_is_normalised_before_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_nickname()
            .withf(|_, nickname| nickname.as_str() == "ada_99")
            .returning(|_, _| Ok(true));

        let service = AccountService::new(Arc::new(repo));
        let stored = service
            .set_nickname(caller(), "  Ada_99 ".into())
            .await
            .unwrap();
        assert_eq!(stored, "ada_99");
    }

    #[tokio::test]
    async fn taken_nickname_is_a_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_nickname()
            .returning(|_, _| Err(UserRepositoryError::nickname_taken()));

        let service = AccountService::new(Arc::new(repo));
        let err = service
            .set_nickname(caller(), "lovelace".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn nickname_for_a_deleted_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_nickname().returning(|_, _| Ok(false));

        let service = AccountService::new(Arc::new(repo));
        let err = service
            .set_nickname(caller(), "lovelace".into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
