//! Issue form actions for signed-in users.
//!
//! ```text
//! POST   /actions/issues        {"title":"Fix login","userId":"..."}
//! PATCH  /actions/issues/{id}   {"status":"done"}
//! DELETE /actions/issues/{id}
//! ```
//!
//! The caller comes from the session cookie. Anonymous requests, failed
//! validation and missing issues are answered with a `200 OK`
//! [`ActionResponse`] carrying `success: false`.

use actix_web::{HttpResponse, delete, patch, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::IssueError;
use crate::domain::{Caller, IssueChanges, IssueFields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ActionResponse, VALIDATION_FAILED};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{deserialize_present, parse_issue_id};

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";
const ISSUE_NOT_FOUND: &str = "Issue not found";

/// JSON body for `POST /actions/issues`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueBody {
    #[schema(example = "Login button does nothing")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "todo")]
    pub status: Option<String>,
    #[schema(example = "high")]
    pub priority: Option<String>,
    pub user_id: Option<String>,
}

impl From<IssueBody> for IssueFields {
    fn from(body: IssueBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            status: body.status,
            priority: body.priority,
            user_id: body.user_id,
        }
    }
}

/// JSON body for `PATCH /actions/issues/{id}`. Absent fields are left
/// untouched; `"description": null` clears the description.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuePatchBody {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub user_id: Option<String>,
}

impl From<IssuePatchBody> for IssueChanges {
    fn from(body: IssuePatchBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            status: body.status,
            priority: body.priority,
            user_id: body.user_id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum IssueAction {
    Create,
    Update,
    Delete,
}

impl IssueAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }

    fn succeeded(self) -> ActionResponse {
        ActionResponse::ok(format!("Issue {} successfully", self.past_tense()))
    }

    fn failed(self, err: IssueError) -> ActionResponse {
        match err {
            IssueError::Validation(errors) => ActionResponse::invalid(VALIDATION_FAILED, errors),
            IssueError::Unauthorized => unauthorized(),
            IssueError::NotFound(_) => not_found(),
            IssueError::Storage(_) => ActionResponse::failed(
                format!("An error occurred while {} the issue", self.gerund()),
                format!("Could not {} the issue", self.verb()),
            ),
        }
    }

    fn respond(self, outcome: Result<(), IssueError>) -> HttpResponse {
        match outcome {
            Ok(()) => self.succeeded(),
            Err(err) => self.failed(err),
        }
        .respond()
    }
}

fn unauthorized() -> ActionResponse {
    ActionResponse::failed(UNAUTHORIZED_MESSAGE, "Unauthorized")
}

fn not_found() -> ActionResponse {
    ActionResponse::failed(ISSUE_NOT_FOUND, ISSUE_NOT_FOUND)
}

/// Envelope for a path segment that is not an issue id. Anonymous callers
/// learn nothing beyond the need to sign in.
fn unknown_id(caller: &Caller) -> HttpResponse {
    if caller.may_mutate() {
        not_found().respond()
    } else {
        unauthorized().respond()
    }
}

/// Create an issue as the signed-in user.
#[utoipa::path(
    post,
    path = "/actions/issues",
    request_body = IssueBody,
    responses(
        (status = 200, description = "Outcome envelope", body = ActionResponse),
        (status = 400, description = "Body is not JSON", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["actions"],
    operation_id = "createIssueAction",
    security(("SessionCookie" = []))
)]
#[post("/issues")]
pub async fn create_issue(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<IssueBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller();
    let outcome = state
        .issues
        .create(&caller, body.into_inner().into())
        .await
        .map(drop);
    Ok(IssueAction::Create.respond(outcome))
}

/// Apply a partial update to an issue.
#[utoipa::path(
    patch,
    path = "/actions/issues/{id}",
    params(("id" = i32, Path, description = "Issue identifier")),
    request_body = IssuePatchBody,
    responses(
        (status = 200, description = "Outcome envelope", body = ActionResponse),
        (status = 400, description = "Body is not JSON", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["actions"],
    operation_id = "updateIssueAction",
    security(("SessionCookie" = []))
)]
#[patch("/issues/{id}")]
pub async fn update_issue(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Json<IssuePatchBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller();
    let Some(id) = parse_issue_id(&path) else {
        return Ok(unknown_id(&caller));
    };
    let outcome = state
        .issues
        .update(&caller, id, body.into_inner().into())
        .await
        .map(drop);
    Ok(IssueAction::Update.respond(outcome))
}

/// Delete an issue.
#[utoipa::path(
    delete,
    path = "/actions/issues/{id}",
    params(("id" = i32, Path, description = "Issue identifier")),
    responses(
        (status = 200, description = "Outcome envelope", body = ActionResponse)
    ),
    tags = ["actions"],
    operation_id = "deleteIssueAction",
    security(("SessionCookie" = []))
)]
#[delete("/issues/{id}")]
pub async fn delete_issue(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller();
    let Some(id) = parse_issue_id(&path) else {
        return Ok(unknown_id(&caller));
    };
    let outcome = state.issues.delete(&caller, id).await;
    Ok(IssueAction::Delete.respond(outcome))
}

#[cfg(test)]
#[path = "issue_actions_tests.rs"]
mod tests;
