//! Comment content validation.

use std::fmt;

/// Upper bound on comment length in characters.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Validation errors for comment content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentContentError {
    /// Comment was empty once trimmed.
    Empty,
    /// Comment exceeded [`MAX_COMMENT_CHARS`].
    TooLong,
}

impl fmt::Display for CommentContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "comment must not be empty"),
            Self::TooLong => {
                write!(f, "comment must be at most {MAX_COMMENT_CHARS} characters")
            }
        }
    }
}

impl std::error::Error for CommentContentError {}

/// Validated comment body.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - At most [`MAX_COMMENT_CHARS`] characters; exactly the bound is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    /// Trim and validate raw comment content.
    pub fn parse(raw: &str) -> Result<Self, CommentContentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CommentContentError::Empty);
        }
        if trimmed.chars().count() > MAX_COMMENT_CHARS {
            return Err(CommentContentError::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The validated comment text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper and return the comment text.
    pub fn into_string(self) -> String {
        self.0
    }
}
