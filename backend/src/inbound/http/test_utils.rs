//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use chrono::{TimeZone, Utc};

use crate::domain::ports::{MockAccountCommand, MockIssueCommand, MockIssueQuery};
use crate::domain::{Issue, IssueId, IssuePriority, IssueStatus, IssueTitle, OwnerId};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub issues: MockIssueCommand,
    pub issues_query: MockIssueQuery,
}

impl MockPorts {
    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.accounts),
            Arc::new(self.issues),
            Arc::new(self.issues_query),
        )
    }
}

/// A stored issue with fixed timestamps.
pub fn sample_issue(id: i32) -> Issue {
    let at = Utc
        .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    Issue {
        id: IssueId::new(id),
        title: IssueTitle::new("Broken login").expect("fixture title"),
        description: None,
        status: IssueStatus::Backlog,
        priority: IssuePriority::Medium,
        user_id: OwnerId::new("u1").expect("fixture owner"),
        created_at: at,
        updated_at: at,
    }
}
