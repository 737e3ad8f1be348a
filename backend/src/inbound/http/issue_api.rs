//! Open JSON API over issues.
//!
//! ```text
//! GET  /api/issue
//! GET  /api/issue/{id}
//! POST /api/issue {"title":"Fix bug","userId":"u1"}
//! ```
//!
//! This surface predates the form actions and keeps its own error body,
//! `{"error": "..."}`, rather than the domain [`Error`](crate::domain::Error).
//! It is unauthenticated and acts as [`Caller::TrustedApi`].

use std::fmt;

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::ports::IssueError;
use crate::domain::{Caller, FieldErrors, Issue, IssueFields, IssuePriority, IssueStatus};
use crate::inbound::http::envelope::VALIDATION_FAILED;
use crate::inbound::http::schemas::IssueSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_issue_id;

const ISSUE_NOT_FOUND: &str = "Issue not found";
const ISSUE_CREATED: &str = "Issue created successfully";
const TITLE_AND_USER_REQUIRED: &str = "Title and user id are required.";

/// Error body returned by the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiErrorBody {
    /// Human-readable failure.
    #[schema(example = "Issue not found")]
    pub error: String,
    /// Field-keyed validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<std::collections::HashMap<String, Vec<String>>>)]
    pub errors: Option<FieldErrors>,
}

/// Failure of a JSON API request, rendered as [`ApiErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl IssueApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: error.into(),
                errors: None,
            },
        }
    }

    /// `400` with a summary.
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// `400` with field errors.
    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                error: VALIDATION_FAILED.to_owned(),
                errors: Some(errors),
            },
        }
    }

    /// `404` for an unknown issue.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ISSUE_NOT_FOUND)
    }

    /// `500` with a generic summary.
    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    /// Body sent to the client.
    pub fn body(&self) -> &ApiErrorBody {
        &self.body
    }
}

impl fmt::Display for IssueApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.body.error)
    }
}

impl ResponseError for IssueApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected JSON body");
    IssueApiError::bad_request("Request body must be valid JSON").into()
}

/// JSON extractor configuration answering parse failures with [`ApiErrorBody`].
pub(crate) fn api_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Body for `POST /api/issue`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    /// Required, 3 to 100 characters.
    #[schema(example = "Fix bug")]
    pub title: Option<String>,
    /// Empty strings are stored as null.
    pub description: Option<String>,
    /// Defaults to `backlog` when absent or empty.
    pub status: Option<String>,
    /// Defaults to `medium` when absent or empty.
    pub priority: Option<String>,
    /// Required owner identifier.
    #[schema(example = "u1")]
    pub user_id: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.is_empty())
}

impl CreateIssueRequest {
    /// Check required fields and fill defaults.
    fn into_fields(self) -> Result<IssueFields, IssueApiError> {
        let (Some(title), Some(user_id)) = (present(self.title), present(self.user_id)) else {
            return Err(IssueApiError::bad_request(TITLE_AND_USER_REQUIRED));
        };
        let status = present(self.status).unwrap_or_else(|| IssueStatus::default().to_string());
        let priority =
            present(self.priority).unwrap_or_else(|| IssuePriority::default().to_string());
        Ok(IssueFields {
            title: Some(title),
            description: self.description,
            status: Some(status),
            priority: Some(priority),
            user_id: Some(user_id),
        })
    }
}

/// Success body for `POST /api/issue`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IssueCreated {
    #[schema(example = "Issue created successfully")]
    pub message: String,
    #[schema(value_type = IssueSchema)]
    pub issue: Issue,
}

/// Map a service failure, logging anything the client does not see.
fn service_failure(err: IssueError, public: &str) -> IssueApiError {
    match err {
        IssueError::NotFound(_) => IssueApiError::not_found(),
        IssueError::Validation(errors) => IssueApiError::invalid(errors),
        IssueError::Unauthorized | IssueError::Storage(_) => {
            error!(error = %err, "issue API request failed");
            IssueApiError::internal(public)
        }
    }
}

/// List every issue, ordered by id.
#[utoipa::path(
    get,
    path = "/api/issue",
    responses(
        (status = 200, description = "All issues", body = [IssueSchema]),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    ),
    tags = ["issues"],
    operation_id = "listIssues",
    security([])
)]
#[get("/issue")]
pub async fn list_issues(
    state: web::Data<HttpState>,
) -> Result<web::Json<Vec<Issue>>, IssueApiError> {
    state
        .issues_query
        .list()
        .await
        .map(web::Json)
        .map_err(|err| service_failure(err, "Could not fetch issues"))
}

/// Fetch one issue. Ids that are not integers are reported as missing.
#[utoipa::path(
    get,
    path = "/api/issue/{id}",
    params(("id" = i32, Path, description = "Issue identifier")),
    responses(
        (status = 200, description = "The issue", body = IssueSchema),
        (status = 404, description = "No such issue", body = ApiErrorBody),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    ),
    tags = ["issues"],
    operation_id = "getIssue",
    security([])
)]
#[get("/issue/{id}")]
pub async fn get_issue(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> Result<web::Json<Issue>, IssueApiError> {
    let id = parse_issue_id(&path).ok_or_else(IssueApiError::not_found)?;
    state
        .issues_query
        .get(id)
        .await
        .map(web::Json)
        .map_err(|err| service_failure(err, "Could not fetch the issue"))
}

/// Create an issue without a session.
#[utoipa::path(
    post,
    path = "/api/issue",
    request_body = CreateIssueRequest,
    responses(
        (status = 201, description = "Issue created", body = IssueCreated),
        (status = 400, description = "Missing or invalid fields", body = ApiErrorBody),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    ),
    tags = ["issues"],
    operation_id = "createIssue",
    security([])
)]
#[post("/issue")]
pub async fn create_issue(
    state: web::Data<HttpState>,
    payload: web::Json<CreateIssueRequest>,
) -> Result<HttpResponse, IssueApiError> {
    let fields = payload.into_inner().into_fields()?;
    let issue = state
        .issues
        .create(&Caller::TrustedApi, fields)
        .await
        .map_err(|err| service_failure(err, "Could not create the issue"))?;
    Ok(HttpResponse::Created().json(IssueCreated {
        message: ISSUE_CREATED.to_owned(),
        issue,
    }))
}

#[cfg(test)]
#[path = "issue_api_tests.rs"]
mod tests;
