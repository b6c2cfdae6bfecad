//! OpenAPI schema definitions for response envelopes.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; these
//! mirror types exist only so the documentation can describe the wire
//! format.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for the error envelope returned by every rejection path.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Fixed, non-technical description of the failure.
    #[schema(example = "validation failed")]
    error: String,
    /// Per-field messages, present only on validation failures.
    field_errors: Option<BTreeMap<String, String>>,
    /// Correlation identifier also sent in the `trace-id` header.
    #[schema(value_type = Option<String>, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}
