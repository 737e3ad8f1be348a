//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint (form actions, the issue API and
//! health probes), the schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth_actions::{SignInForm, SignUpForm};
use crate::inbound::http::envelope::ActionResponse;
use crate::inbound::http::issue_actions::{IssueBody, IssuePatchBody};
use crate::inbound::http::issue_api::{ApiErrorBody, CreateIssueRequest, IssueCreated};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, IssuePrioritySchema, IssueSchema, IssueStatusSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the sign-in and sign-up actions.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Issue tracker API",
        description = "Form actions for signed-in users, an open JSON issue API and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth_actions::sign_in,
        crate::inbound::http::auth_actions::sign_up,
        crate::inbound::http::auth_actions::sign_out,
        crate::inbound::http::issue_actions::create_issue,
        crate::inbound::http::issue_actions::update_issue,
        crate::inbound::http::issue_actions::delete_issue,
        crate::inbound::http::issue_api::list_issues,
        crate::inbound::http::issue_api::get_issue,
        crate::inbound::http::issue_api::create_issue,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        IssueSchema,
        IssueStatusSchema,
        IssuePrioritySchema,
        ActionResponse,
        ApiErrorBody,
        SignInForm,
        SignUpForm,
        IssueBody,
        IssuePatchBody,
        CreateIssueRequest,
        IssueCreated,
    )),
    tags(
        (name = "actions", description = "Form actions answering a success envelope"),
        (name = "issues", description = "Open JSON API over issues"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
