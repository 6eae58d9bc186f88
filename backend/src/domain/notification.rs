//! Notification kinds and their wire identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of the event a notification was derived from.
///
/// Only `Like` and `Follow` are emitted today; `Comment` is reserved in the
/// data model but no operation currently produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone liked the recipient's post.
    Like,
    /// Someone commented on the recipient's post.
    Comment,
    /// Someone started following the recipient.
    Follow,
}

impl NotificationKind {
    /// Identifier stored in the `notifications.kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Follow => "follow",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a stored kind string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNotificationKind(pub String);

impl fmt::Display for UnknownNotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown notification kind: {}", self.0)
    }
}

impl std::error::Error for UnknownNotificationKind {}

impl FromStr for NotificationKind {
    type Err = UnknownNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "comment" => Ok(Self::Comment),
            "follow" => Ok(Self::Follow),
            other => Err(UnknownNotificationKind(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NotificationKind::Like, "like")]
    #[case(NotificationKind::Comment, "comment")]
    #[case(NotificationKind::Follow, "follow")]
    fn kinds_round_trip_their_identifier(#[case] kind: NotificationKind, #[case] text: &str) {
        assert_eq!(kind.as_str(), text);
        assert_eq!(text.parse::<NotificationKind>().unwrap(), kind);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!("poke".parse::<NotificationKind>().is_err());
    }
}
