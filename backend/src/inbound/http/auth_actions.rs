//! Sign-in, sign-up and sign-out form actions.
//!
//! ```text
//! POST /actions/sign-in   email=ada@example.com&password=secret1
//! POST /actions/sign-up   email=...&password=...&confirmPassword=...
//! POST /actions/sign-out
//! ```
//!
//! Every outcome except sign-out is a `200 OK` [`ActionResponse`]; the
//! session cookie is only issued on success.

use actix_web::http::header;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountError, DUPLICATE_ACCOUNT_MESSAGE, INVALID_CREDENTIALS_MESSAGE, SignInRequest,
    SignUpRequest,
};
use crate::domain::{EMAIL_FIELD, FieldErrors, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ActionResponse, VALIDATION_FAILED};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Where sign-out sends the browser.
pub const SIGN_IN_PAGE: &str = "/signin";

const SIGNED_IN: &str = "Signed in successfully";
const ACCOUNT_CREATED: &str = "Account created successfully";
const SOMETHING_WENT_WRONG: &str = "Something went wrong";

/// Urlencoded body for `POST /actions/sign-in`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Urlencoded body for `POST /actions/sign-up`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<SignInForm> for SignInRequest {
    fn from(form: SignInForm) -> Self {
        Self {
            email: form.email,
            password: Zeroizing::new(form.password),
        }
    }
}

impl From<SignUpForm> for SignUpRequest {
    fn from(form: SignUpForm) -> Self {
        Self {
            email: form.email,
            password: Zeroizing::new(form.password),
            confirm_password: Zeroizing::new(form.confirm_password),
        }
    }
}

/// Envelope for an account failure. Sign-in and sign-up differ only in the
/// storage fallback.
fn account_failure(err: AccountError, storage_message: &str) -> ActionResponse {
    match err {
        AccountError::Validation(errors) => ActionResponse::invalid(VALIDATION_FAILED, errors),
        AccountError::InvalidCredentials => ActionResponse::invalid(
            INVALID_CREDENTIALS_MESSAGE,
            FieldErrors::single(EMAIL_FIELD, INVALID_CREDENTIALS_MESSAGE),
        ),
        AccountError::DuplicateAccount => ActionResponse::invalid(
            DUPLICATE_ACCOUNT_MESSAGE,
            FieldErrors::single(EMAIL_FIELD, DUPLICATE_ACCOUNT_MESSAGE),
        ),
        AccountError::Storage(_) => ActionResponse::failed(storage_message, SOMETHING_WENT_WRONG),
    }
}

fn signed_in(session: &SessionContext, user_id: &UserId, message: &str) -> ApiResult<HttpResponse> {
    session.persist_user(user_id)?;
    info!(user_id = %user_id, "session established");
    Ok(ActionResponse::ok(message).respond())
}

/// Verify credentials and start a session.
///
/// Unknown emails and wrong passwords produce byte-identical bodies.
#[utoipa::path(
    post,
    path = "/actions/sign-in",
    request_body(content = SignInForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome envelope", body = ActionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie on success"))),
        (status = 400, description = "Body is not form data", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["actions"],
    operation_id = "signIn",
    security([])
)]
#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignInForm>,
) -> ApiResult<HttpResponse> {
    match state.accounts.sign_in(form.into_inner().into()).await {
        Ok(user_id) => signed_in(&session, &user_id, SIGNED_IN),
        Err(err) => Ok(account_failure(err, SOMETHING_WENT_WRONG).respond()),
    }
}

/// Register an account and start a session.
#[utoipa::path(
    post,
    path = "/actions/sign-up",
    request_body(content = SignUpForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome envelope", body = ActionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie on success"))),
        (status = 400, description = "Body is not form data", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["actions"],
    operation_id = "signUp",
    security([])
)]
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignUpForm>,
) -> ApiResult<HttpResponse> {
    match state.accounts.sign_up(form.into_inner().into()).await {
        Ok(user_id) => signed_in(&session, &user_id, ACCOUNT_CREATED),
        Err(err) => Ok(account_failure(err, "Account creation failed").respond()),
    }
}

/// End the session and redirect to the sign-in page.
///
/// Always redirects, even when the session could not be destroyed.
#[utoipa::path(
    post,
    path = "/actions/sign-out",
    responses(
        (status = 303, description = "Redirect to the sign-in page",
            headers(("Location" = String, description = "Always /signin")))
    ),
    tags = ["actions"],
    operation_id = "signOut",
    security([])
)]
#[post("/sign-out")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    let caller = session.caller();
    session.end();
    info!(%caller, "session ended");
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SIGN_IN_PAGE))
        .finish()
}

#[cfg(test)]
#[path = "auth_actions_tests.rs"]
mod tests;
