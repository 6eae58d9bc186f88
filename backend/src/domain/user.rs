//! User identity primitives and the user aggregate.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed user identifier.
///
/// # Examples
/// ```
/// use backend::domain::UserId;
///
/// let id = UserId::parse("00000000-0000-0000-0000-000000000001").unwrap();
/// assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a textual UUID, as stored in the session cookie.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(raw)?))
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Domain error returned when a nickname fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameValidationError {
    /// Nickname was empty once trimmed.
    Empty,
    /// Nickname was shorter than three characters.
    TooShort,
    /// Nickname exceeded thirty characters.
    TooLong,
    /// Nickname contained characters outside `[a-z0-9_]`.
    InvalidCharacters,
}

impl fmt::Display for NicknameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "nickname must not be empty"),
            Self::TooShort => write!(f, "nickname must be at least 3 characters"),
            Self::TooLong => write!(f, "nickname must be at most 30 characters"),
            Self::InvalidCharacters => {
                write!(f, "nickname may only contain a-z, 0-9 and underscores")
            }
        }
    }
}

impl std::error::Error for NicknameValidationError {}

/// Validated unique handle chosen by the user.
///
/// ## Invariants
/// - Lowercased, trimmed, 3 to 30 characters.
/// - Characters restricted to `[a-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    /// Normalise and validate a raw nickname.
    pub fn parse(raw: &str) -> Result<Self, NicknameValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(NicknameValidationError::Empty);
        }
        if normalized.chars().count() < 3 {
            return Err(NicknameValidationError::TooShort);
        }
        if normalized.chars().count() > 30 {
            return Err(NicknameValidationError::TooLong);
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(NicknameValidationError::InvalidCharacters);
        }
        Ok(Self(normalized))
    }

    /// The normalised nickname text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user as stored in the relational store.
///
/// Created on first external-identity login and refreshed on subsequent
/// logins; the nickname is only ever set through an explicit profile edit.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Primary identifier.
    pub id: UserId,
    /// Identifier assigned by the external identity provider.
    pub external_id: String,
    /// Email address reported by the identity provider.
    pub email: String,
    /// Display name shown next to posts and comments.
    pub display_name: String,
    /// Optional unique handle.
    pub nickname: Option<String>,
    /// Optional avatar URL.
    pub picture_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
