//! Shared request-parsing helpers for inbound HTTP adapters.

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::{HttpRequest, web};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, IssueId};

/// Parse an issue id path segment. Non-integers yield `None`.
pub(crate) fn parse_issue_id(raw: &str) -> Option<IssueId> {
    raw.parse::<i32>().ok().map(IssueId::new)
}

/// Deserialize a field that is present, keeping explicit `null` as
/// `Some(None)`. Pair with `#[serde(default)]` so absence stays `None`.
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected JSON body");
    Error::invalid_request("request body must be valid JSON")
        .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }))
        .into()
}

fn form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected form body");
    Error::invalid_request("request body must be URL-encoded form data")
        .with_details(json!({ "code": "invalid_form" }))
        .into()
}

/// JSON extractor configuration mapping parse failures to [`Error`].
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Form extractor configuration mapping parse failures to [`Error`].
pub(crate) fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(form_error)
}
