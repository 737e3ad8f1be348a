//! Contract checks for the port error types and driving-port messages.

use super::*;
use rstest::rstest;

#[rstest]
fn user_persistence_errors_describe_cause() {
    assert_eq!(
        UserPersistenceError::connection("refused").to_string(),
        "user repository connection failed: refused"
    );
    assert_eq!(
        UserPersistenceError::duplicate("a@b.co").to_string(),
        "an account already exists for a@b.co"
    );
}

#[rstest]
fn issue_persistence_errors_describe_cause() {
    assert_eq!(
        IssuePersistenceError::query("syntax error").to_string(),
        "issue repository query failed: syntax error"
    );
}

#[rstest]
fn password_hash_errors_describe_cause() {
    assert_eq!(
        PasswordHashError::malformed_digest("bad phc").to_string(),
        "stored password digest is malformed: bad phc"
    );
}

#[rstest]
fn issue_errors_name_the_missing_id() {
    let err = IssueError::NotFound(crate::domain::IssueId::new(42));
    assert_eq!(err.to_string(), "issue 42 not found");
}

#[rstest]
fn validation_errors_list_failing_fields() {
    let mut fields = crate::domain::FieldErrors::new();
    fields.push("title", "too short");
    fields.push("status", "invalid");
    assert_eq!(
        AccountError::Validation(fields.clone()).to_string(),
        "validation failed for: status, title"
    );
    assert_eq!(
        IssueError::Validation(fields).to_string(),
        "validation failed for: status, title"
    );
}

#[rstest]
fn sign_in_failure_message_is_generic() {
    assert!(!INVALID_CREDENTIALS_MESSAGE.to_lowercase().contains("not found"));
    assert!(!INVALID_CREDENTIALS_MESSAGE.to_lowercase().contains("wrong password"));
}
