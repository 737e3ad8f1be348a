//! Tests for issue validation.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

#[fixture]
fn valid_fields() -> IssueFields {
    IssueFields {
        title: Some("Broken login".into()),
        description: Some("Cannot sign in".into()),
        status: Some("todo".into()),
        priority: Some("high".into()),
        user_id: Some("u1".into()),
    }
}

#[rstest]
fn validate_accepts_well_formed_fields(valid_fields: IssueFields) {
    let issue = NewIssue::validate(valid_fields).expect("valid issue");
    assert_eq!(issue.title.as_ref(), "Broken login");
    assert_eq!(issue.description.as_deref(), Some("Cannot sign in"));
    assert_eq!(issue.status, IssueStatus::Todo);
    assert_eq!(issue.priority, IssuePriority::High);
    assert_eq!(issue.user_id.as_ref(), "u1");
}

#[rstest]
#[case("abc", true)]
#[case("ab", false)]
#[case(&"x".repeat(100), true)]
#[case(&"x".repeat(101), false)]
fn title_length_bounds(valid_fields: IssueFields, #[case] title: &str, #[case] ok: bool) {
    let fields = IssueFields {
        title: Some(title.to_owned()),
        ..valid_fields
    };
    assert_eq!(NewIssue::validate(fields).is_ok(), ok);
}

#[rstest]
fn title_counts_characters_not_bytes(valid_fields: IssueFields) {
    let fields = IssueFields {
        title: Some("ñño".into()),
        ..valid_fields
    };
    assert!(NewIssue::validate(fields).is_ok());
}

#[rstest]
fn short_title_reports_minimum(valid_fields: IssueFields) {
    let fields = IssueFields {
        title: Some("ab".into()),
        ..valid_fields
    };
    let errors = NewIssue::validate(fields).expect_err("short title");
    assert_eq!(
        errors.get(TITLE_FIELD),
        Some(&["Title must be at least 3 characters".to_owned()][..])
    );
}

#[rstest]
#[case(USER_ID_MAX_LEN, true)]
#[case(USER_ID_MAX_LEN + 1, false)]
fn owner_length_bounds(valid_fields: IssueFields, #[case] length: usize, #[case] ok: bool) {
    let fields = IssueFields {
        user_id: Some("u".repeat(length)),
        ..valid_fields
    };
    assert_eq!(NewIssue::validate(fields).is_ok(), ok);
}

#[rstest]
fn oversized_owner_reports_field_message(valid_fields: IssueFields) {
    let fields = IssueFields {
        user_id: Some("u".repeat(300)),
        ..valid_fields
    };
    let errors = NewIssue::validate(fields).expect_err("owner too long");
    assert_eq!(
        errors.get(USER_ID_FIELD),
        Some(&["User id must be at most 255 characters".to_owned()][..])
    );
}

#[rstest]
fn oversized_owner_in_patch_is_rejected() {
    let errors = IssuePatch::validate(IssueChanges {
        user_id: Some("u".repeat(USER_ID_MAX_LEN + 1)),
        ..IssueChanges::default()
    })
    .expect_err("owner too long");
    assert!(errors.contains(USER_ID_FIELD));
}

#[rstest]
fn every_failure_is_reported_together() {
    let errors = NewIssue::validate(IssueFields {
        title: Some("ab".into()),
        description: None,
        status: Some("archived".into()),
        priority: Some("urgent".into()),
        user_id: Some(String::new()),
    })
    .expect_err("all fields invalid");

    let fields: Vec<&str> = errors.fields().collect();
    assert_eq!(fields, vec!["priority", "status", "title", "userId"]);
    assert_eq!(
        errors.get(STATUS_FIELD),
        Some(&["Please select a valid status.".to_owned()][..])
    );
    assert_eq!(
        errors.get(PRIORITY_FIELD),
        Some(&["Please select a valid priority.".to_owned()][..])
    );
}

#[rstest]
fn missing_fields_are_rejected() {
    let errors = NewIssue::validate(IssueFields::default()).expect_err("empty input");
    for field in [TITLE_FIELD, STATUS_FIELD, PRIORITY_FIELD, USER_ID_FIELD] {
        assert!(errors.contains(field), "{field} should fail");
    }
}

#[rstest]
fn empty_description_becomes_none(valid_fields: IssueFields) {
    let fields = IssueFields {
        description: Some(String::new()),
        ..valid_fields
    };
    let issue = NewIssue::validate(fields).expect("valid issue");
    assert!(issue.description.is_none());
}

#[rstest]
#[case("backlog", IssueStatus::Backlog)]
#[case("todo", IssueStatus::Todo)]
#[case("in_progress", IssueStatus::InProgress)]
#[case("done", IssueStatus::Done)]
fn status_literals_parse(#[case] raw: &str, #[case] expected: IssueStatus) {
    assert_eq!(raw.parse::<IssueStatus>(), Ok(expected));
    assert_eq!(expected.as_str(), raw);
}

#[rstest]
#[case("Done")]
#[case("in-progress")]
#[case("")]
fn status_rejects_unknown_literals(#[case] raw: &str) {
    assert!(raw.parse::<IssueStatus>().is_err());
}

#[rstest]
fn defaults_match_api_fallbacks() {
    assert_eq!(IssueStatus::default(), IssueStatus::Backlog);
    assert_eq!(IssuePriority::default(), IssuePriority::Medium);
}

#[rstest]
fn patch_validates_only_present_fields() {
    let patch = IssuePatch::validate(IssueChanges {
        priority: Some("low".into()),
        ..IssueChanges::default()
    })
    .expect("valid patch");
    assert_eq!(patch.priority, Some(IssuePriority::Low));
    assert!(patch.title.is_none());
    assert!(patch.status.is_none());
    assert!(!patch.is_empty());
}

#[rstest]
fn patch_rejects_invalid_present_fields() {
    let errors = IssuePatch::validate(IssueChanges {
        title: Some("x".into()),
        user_id: Some(String::new()),
        ..IssueChanges::default()
    })
    .expect_err("invalid patch");
    assert!(errors.contains(TITLE_FIELD));
    assert!(errors.contains(USER_ID_FIELD));
}

#[rstest]
fn empty_changes_produce_empty_patch() {
    let patch = IssuePatch::validate(IssueChanges::default()).expect("empty patch");
    assert!(patch.is_empty());
}

#[rstest]
fn patch_applies_present_fields_and_clears_description() {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("timestamp");
    let later = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("timestamp");
    let mut issue = Issue {
        id: IssueId::new(1),
        title: IssueTitle::new("Broken login").expect("title"),
        description: Some("details".into()),
        status: IssueStatus::Backlog,
        priority: IssuePriority::Medium,
        user_id: OwnerId::new("u1").expect("owner"),
        created_at: created,
        updated_at: created,
    };
    let patch = IssuePatch::validate(IssueChanges {
        description: Some(None),
        status: Some("done".into()),
        ..IssueChanges::default()
    })
    .expect("valid patch");

    patch.apply_to(&mut issue, later);

    assert_eq!(issue.title.as_ref(), "Broken login");
    assert!(issue.description.is_none());
    assert_eq!(issue.status, IssueStatus::Done);
    assert_eq!(issue.priority, IssuePriority::Medium);
    assert_eq!(issue.updated_at, later);
    assert_eq!(issue.created_at, created);
}

#[rstest]
fn issue_serialises_with_camel_case_keys() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("timestamp");
    let issue = Issue {
        id: IssueId::new(7),
        title: IssueTitle::new("Broken login").expect("title"),
        description: None,
        status: IssueStatus::InProgress,
        priority: IssuePriority::High,
        user_id: OwnerId::new("u1").expect("owner"),
        created_at: at,
        updated_at: at,
    };
    let value = serde_json::to_value(&issue).expect("serialise");
    assert_eq!(value["id"], 7);
    assert_eq!(value["status"], "in_progress");
    assert_eq!(value["userId"], "u1");
    assert!(value["description"].is_null());
    assert!(value.get("createdAt").is_some());
}
