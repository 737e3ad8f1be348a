//! Domain primitives, validators and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, the rules that turn raw input into them and the
//! services behind the driving ports. Nothing here depends on actix or
//! Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport error payload and its stable code.
//! - FieldErrors: field-keyed validation messages.
//! - User, UserId, EmailAddress, PasswordDigest: account identity.
//! - SignInCredentials, SignUpCredentials: validated auth form input.
//! - Issue and its value types, NewIssue, IssuePatch: issue records.
//! - Caller: who is acting on an issue.
//! - AccountService, IssueCommandService, IssueQueryService: use-cases.

pub mod account_service;
pub mod auth;
pub mod caller;
pub mod error;
pub mod field_errors;
pub mod issue;
pub mod issue_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    CONFIRM_PASSWORD_FIELD, EMAIL_FIELD, PASSWORD_FIELD, PASSWORD_MIN_LEN, SignInCredentials,
    SignUpCredentials,
};
pub use self::caller::Caller;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::field_errors::FieldErrors;
pub use self::issue::{
    Issue, IssueChanges, IssueFields, IssueId, IssuePatch, IssuePriority, IssueStatus,
    IssueTitle, NewIssue, OwnerId, ParseEnumError, TITLE_FIELD, USER_ID_FIELD,
};
pub use self::issue_service::{IssueCommandService, IssueQueryService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, PasswordDigest, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such issue"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
