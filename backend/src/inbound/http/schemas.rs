//! OpenAPI schema definitions for error payloads.
//!
//! The domain error type stays framework-agnostic by not deriving
//! `ToSchema`; this wrapper mirrors the JSON failure envelope the inbound
//! adapter actually emits.

use utoipa::ToSchema;

/// OpenAPI schema for the JSON failure envelope.
#[derive(ToSchema)]
#[schema(as = FailureEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false` on failures.
    #[schema(example = false)]
    success: bool,
    /// Human-readable message; redacted for internal errors.
    #[schema(example = "post not found")]
    message: String,
    /// Supplementary validation details, present on 400 responses.
    details: Option<serde_json::Value>,
}
