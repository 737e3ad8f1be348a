//! Issue records and their validation rules.
//!
//! Inbound adapters collect raw strings into [`IssueFields`] or
//! [`IssueChanges`]; [`NewIssue::validate`] and [`IssuePatch::validate`]
//! turn those into closed types or a [`FieldErrors`] set. Nothing reaches a
//! repository without passing through one of them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FieldErrors;

/// Minimum title length in characters.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Maximum owner identifier length in characters.
pub const USER_ID_MAX_LEN: usize = 255;

/// Wire name of the title field.
pub const TITLE_FIELD: &str = "title";
/// Wire name of the status field.
pub const STATUS_FIELD: &str = "status";
/// Wire name of the priority field.
pub const PRIORITY_FIELD: &str = "priority";
/// Wire name of the owner field.
pub const USER_ID_FIELD: &str = "userId";

const STATUS_MESSAGE: &str = "Please select a valid status.";
const PRIORITY_MESSAGE: &str = "Please select a valid priority.";
const USER_ID_MESSAGE: &str = "User id is required";

/// Storage-assigned issue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(i32);

impl IssueId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returned when a string is not one of the enumerated literals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} value: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Workflow state of an issue. Any value may replace any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Not yet scheduled.
    #[default]
    Backlog,
    /// Scheduled for work.
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl IssueStatus {
    /// Every status in workflow order.
    pub const ALL: [Self; 4] = [Self::Backlog, Self::Todo, Self::InProgress, Self::Done];

    /// Wire literal for the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative urgency of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Urgent.
    High,
}

impl IssuePriority {
    /// Every priority from lowest to highest.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire literal for the priority.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for IssuePriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "priority",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue title between [`TITLE_MIN_LEN`] and [`TITLE_MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IssueTitle(String);

impl IssueTitle {
    /// Validate a raw title, returning the user-facing message on failure.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let title = raw.into();
        let length = title.chars().count();
        if length < TITLE_MIN_LEN {
            return Err(format!("Title must be at least {TITLE_MIN_LEN} characters"));
        }
        if length > TITLE_MAX_LEN {
            return Err(format!("Title must be at most {TITLE_MAX_LEN} characters"));
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for IssueTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Identifier of the user an issue belongs to.
///
/// Kept as free text of at most [`USER_ID_MAX_LEN`] characters: callers on
/// the trusted API path may reference users managed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate a raw owner identifier, returning the user-facing message on
    /// failure.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let owner = raw.into();
        if owner.is_empty() {
            return Err(USER_ID_MESSAGE.to_owned());
        }
        if owner.chars().count() > USER_ID_MAX_LEN {
            return Err(format!("User id must be at most {USER_ID_MAX_LEN} characters"));
        }
        Ok(Self(owner))
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted issue as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Storage-assigned identifier.
    pub id: IssueId,
    /// Short summary.
    pub title: IssueTitle,
    /// Optional long-form text.
    pub description: Option<String>,
    /// Workflow state.
    pub status: IssueStatus,
    /// Urgency.
    pub priority: IssuePriority,
    /// Owning user.
    pub user_id: OwnerId,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

/// Raw create input as received from a form or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    /// Candidate title.
    pub title: Option<String>,
    /// Candidate description.
    pub description: Option<String>,
    /// Candidate status literal.
    pub status: Option<String>,
    /// Candidate priority literal.
    pub priority: Option<String>,
    /// Candidate owner identifier.
    pub user_id: Option<String>,
}

/// Raw partial-update input. `None` means "leave untouched".
///
/// `description` is doubly optional so an explicit `null` can clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement status literal.
    pub status: Option<String>,
    /// Replacement priority literal.
    pub priority: Option<String>,
    /// Owner identifier; validated when present but never written.
    pub user_id: Option<String>,
}

fn check_title(raw: String, errors: &mut FieldErrors) -> Option<IssueTitle> {
    IssueTitle::new(raw)
        .map_err(|message| errors.push(TITLE_FIELD, message))
        .ok()
}

fn check_status(raw: &str, errors: &mut FieldErrors) -> Option<IssueStatus> {
    raw.parse()
        .map_err(|_| errors.push(STATUS_FIELD, STATUS_MESSAGE))
        .ok()
}

fn check_priority(raw: &str, errors: &mut FieldErrors) -> Option<IssuePriority> {
    raw.parse()
        .map_err(|_| errors.push(PRIORITY_FIELD, PRIORITY_MESSAGE))
        .ok()
}

fn check_owner(raw: String, errors: &mut FieldErrors) -> Option<OwnerId> {
    OwnerId::new(raw)
        .map_err(|message| errors.push(USER_ID_FIELD, message))
        .ok()
}

/// Validated payload for inserting an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Validated title.
    pub title: IssueTitle,
    /// Description; empty input is normalised to `None`.
    pub description: Option<String>,
    /// Initial status.
    pub status: IssueStatus,
    /// Initial priority.
    pub priority: IssuePriority,
    /// Owning user.
    pub user_id: OwnerId,
}

impl NewIssue {
    /// Validate every create rule, collecting all failures.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{IssueFields, NewIssue};
    ///
    /// let errors = NewIssue::validate(IssueFields {
    ///     title: Some("ab".into()),
    ///     status: Some("archived".into()),
    ///     priority: Some("low".into()),
    ///     user_id: Some("u1".into()),
    ///     ..IssueFields::default()
    /// })
    /// .unwrap_err();
    /// assert!(errors.contains("title"));
    /// assert!(errors.contains("status"));
    /// ```
    pub fn validate(fields: IssueFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = match fields.title {
            Some(raw) => check_title(raw, &mut errors),
            None => {
                errors.push(TITLE_FIELD, "Title is required");
                None
            }
        };
        let status = check_status(fields.status.as_deref().unwrap_or_default(), &mut errors);
        let priority = check_priority(fields.priority.as_deref().unwrap_or_default(), &mut errors);
        let user_id = check_owner(fields.user_id.unwrap_or_default(), &mut errors);
        let description = fields.description.filter(|text| !text.is_empty());

        match (title, status, priority, user_id) {
            (Some(title), Some(status), Some(priority), Some(user_id)) if errors.is_empty() => {
                Ok(Self {
                    title,
                    description,
                    status,
                    priority,
                    user_id,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validated partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    /// Replacement title.
    pub title: Option<IssueTitle>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<IssueStatus>,
    /// Replacement priority.
    pub priority: Option<IssuePriority>,
}

impl IssuePatch {
    /// Apply the create rules to whichever fields are present.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{IssueChanges, IssuePatch, IssueStatus};
    ///
    /// let patch = IssuePatch::validate(IssueChanges {
    ///     status: Some("done".into()),
    ///     ..IssueChanges::default()
    /// })
    /// .unwrap();
    /// assert_eq!(patch.status, Some(IssueStatus::Done));
    /// assert!(patch.title.is_none());
    /// ```
    pub fn validate(changes: IssueChanges) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = changes.title.and_then(|raw| check_title(raw, &mut errors));
        let status = changes
            .status
            .as_deref()
            .and_then(|raw| check_status(raw, &mut errors));
        let priority = changes
            .priority
            .as_deref()
            .and_then(|raw| check_priority(raw, &mut errors));
        if let Some(raw) = changes.user_id {
            check_owner(raw, &mut errors);
        }

        let description = changes.description;
        errors.into_result(|| Self {
            title,
            description,
            status,
            priority,
        })
    }

    /// Whether the patch writes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    /// Write the present fields onto `issue`, stamping `updated_at`.
    pub fn apply_to(&self, issue: &mut Issue, updated_at: DateTime<Utc>) {
        if let Some(title) = &self.title {
            issue.title = title.clone();
        }
        if let Some(description) = &self.description {
            issue.description = description.clone();
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        issue.updated_at = updated_at;
    }
}

#[cfg(test)]
mod tests;
