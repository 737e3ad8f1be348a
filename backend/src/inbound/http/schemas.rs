//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and are registered under the
//! domain type's path so generated documents name the real type.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
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
    #[schema(example = "request body must be valid JSON")]
    message: String,
    /// Correlation identifier matching the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::IssueStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::IssueStatus)]
pub enum IssueStatusSchema {
    /// Not yet scheduled.
    #[schema(rename = "backlog")]
    Backlog,
    /// Scheduled for work.
    #[schema(rename = "todo")]
    Todo,
    /// Being worked on.
    #[schema(rename = "in_progress")]
    InProgress,
    /// Finished.
    #[schema(rename = "done")]
    Done,
}

/// OpenAPI schema for [`crate::domain::IssuePriority`].
#[derive(ToSchema)]
#[schema(as = crate::domain::IssuePriority)]
pub enum IssuePrioritySchema {
    /// Can wait.
    #[schema(rename = "low")]
    Low,
    /// Normal urgency.
    #[schema(rename = "medium")]
    Medium,
    /// Urgent.
    #[schema(rename = "high")]
    High,
}

/// OpenAPI schema for [`crate::domain::Issue`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Issue, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IssueSchema {
    /// Storage-assigned identifier.
    #[schema(example = 1)]
    id: i32,
    /// Short summary, 3 to 100 characters.
    #[schema(example = "Login button does nothing")]
    title: String,
    /// Optional long-form text.
    description: Option<String>,
    /// Workflow state.
    status: IssueStatusSchema,
    /// Urgency.
    priority: IssuePrioritySchema,
    /// Owning user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user_id: String,
    /// Insertion time.
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Last write time.
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn schemas_use_domain_names() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert_eq!(IssueSchema::name(), "crate.domain.Issue");
    }

    #[rstest]
    #[case("backlog")]
    #[case("todo")]
    #[case("in_progress")]
    #[case("done")]
    fn status_schema_lists_every_literal(#[case] literal: &str) {
        assert!(schema_to_json::<IssueStatusSchema>().contains(literal));
    }

    #[rstest]
    fn issue_schema_uses_wire_field_names() {
        let json = schema_to_json::<IssueSchema>();
        for field in ["userId", "createdAt", "updatedAt", "description"] {
            assert!(json.contains(field), "schema should contain {field}");
        }
        assert!(!json.contains("user_id"));
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let json = schema_to_json::<ErrorSchema>();
        assert!(json.contains("traceId"));
        assert!(json.contains("message"));
    }
}
