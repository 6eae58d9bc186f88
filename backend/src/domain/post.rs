//! Post content validation and HTML-safe rendering.

use std::fmt;

/// Upper bound on post content length in characters.
pub const MAX_POST_CONTENT_CHARS: usize = 5000;

/// Validation errors for post content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContentError {
    /// Content was empty once trimmed.
    Empty,
    /// Content exceeded [`MAX_POST_CONTENT_CHARS`].
    TooLong,
}

impl fmt::Display for PostContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "post content must not be empty"),
            Self::TooLong => write!(
                f,
                "post content must be at most {MAX_POST_CONTENT_CHARS} characters"
            ),
        }
    }
}

impl std::error::Error for PostContentError {}

/// Validated post body.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - At most [`MAX_POST_CONTENT_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Trim and validate raw post content.
    pub fn parse(raw: &str) -> Result<Self, PostContentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PostContentError::Empty);
        }
        if trimmed.chars().count() > MAX_POST_CONTENT_CHARS {
            return Err(PostContentError::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The validated content text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper and return the content.
    pub fn into_string(self) -> String {
        self.0
    }

    /// HTML-safe rendering for immediate client display after an edit.
    ///
    /// Entities are escaped first, then newlines become `<br>` so the
    /// result can be inserted into the page without re-rendering.
    pub fn to_html(&self) -> String {
        let escaped = escape_html(self.0.as_str());
        escaped.replace("\r\n", "<br>").replace('\n', "<br>")
    }
}

impl fmt::Display for PostContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Escape the five HTML-significant characters.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
