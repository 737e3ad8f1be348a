//! Uniform result body for form actions.
//!
//! Every action answers `200 OK` with `{success, message, errors?, error?}`;
//! clients branch on `success` rather than the status code.

use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FieldErrors;

/// Generic message for validation failures.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Body returned by every form action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ActionResponse {
    /// Whether the action took effect.
    pub success: bool,
    /// Human-readable outcome.
    #[schema(example = "Issue created successfully")]
    pub message: String,
    /// Field-keyed validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<std::collections::HashMap<String, Vec<String>>>)]
    pub errors: Option<FieldErrors>,
    /// Short failure summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    /// Successful outcome.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
            error: None,
        }
    }

    /// Failure carrying field errors.
    pub fn invalid(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Some(errors),
            error: None,
        }
    }

    /// Failure carrying a summary.
    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            error: Some(error.into()),
        }
    }

    /// Render as `200 OK` JSON.
    pub fn respond(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}
