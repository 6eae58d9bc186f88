//! Ports for account lifecycle: identity upsert, profile edits, deletion.

use async_trait::async_trait;

use crate::domain::{Error, Nickname, User, UserId};

use super::define_port_error;
use super::views::UserView;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The requested nickname is already held by another user.
        NicknameTaken {} =>
            "nickname already taken",
    }
}

/// Verified claims handed over by the identity-provider exchange.
///
/// The OAuth token exchange itself happens outside this system; by the time
/// these claims reach the domain they are trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Stable subject identifier from the provider.
    pub external_id: String,
    /// Email address.
    pub email: String,
    /// Display name to refresh on every login.
    pub display_name: String,
    /// Avatar URL to refresh on every login.
    pub picture_url: Option<String>,
}

/// Driven port for user rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert on first login, refresh name/picture/email on later logins,
    /// keyed on the external identity. Returns the stored user either way.
    async fn upsert_identity(&self, claims: &IdentityClaims)
        -> Result<User, UserRepositoryError>;

    /// Set the unique nickname; returns false when the user row is gone.
    async fn set_nickname(
        &self,
        id: UserId,
        nickname: &Nickname,
    ) -> Result<bool, UserRepositoryError>;

    /// Delete the user row; all owned content cascades away.
    async fn delete_user(&self, id: UserId) -> Result<(), UserRepositoryError>;
}

/// Driving port for account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Upsert the user for a verified identity and return their profile.
    async fn login_with_identity(&self, claims: IdentityClaims) -> Result<UserView, Error>;

    /// Validate and set the caller's nickname; returns the normalised form.
    async fn set_nickname(&self, user: UserId, nickname: String) -> Result<String, Error>;

    /// Delete the caller's account and everything it owns.
    async fn delete_account(&self, user: UserId) -> Result<(), Error>;
}
