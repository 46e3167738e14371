//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; these
//! mirrors carry the documentation instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed input, chair not assigned, or transition refused.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Session cookie missing or unknown.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// No ride with the requested identifier.
    #[schema(rename = "not_found")]
    NotFound,
    /// Storage failure; the message is redacted.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "chair has not arrived yet")]
    message: String,
    /// Request trace identifier, echoed in the `trace-id` header.
    #[schema(format = "uuid")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}
