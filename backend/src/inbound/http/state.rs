//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, IssueCommand, IssueQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Sign-in and sign-up.
    pub accounts: Arc<dyn AccountCommand>,
    /// Issue mutations.
    pub issues: Arc<dyn IssueCommand>,
    /// Issue reads.
    pub issues_query: Arc<dyn IssueQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{AccountService, IssueCommandService, IssueQueryService};
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::{InMemoryIssueRepository, InMemoryUserRepository};
    /// use backend::outbound::security::Argon2PasswordHasher;
    /// use mockable::DefaultClock;
    ///
    /// let issues = Arc::new(InMemoryIssueRepository::new(Arc::new(DefaultClock)));
    /// let state = HttpState::new(
    ///     Arc::new(AccountService::new(
    ///         Arc::new(InMemoryUserRepository::new()),
    ///         Arc::new(Argon2PasswordHasher::new()),
    ///         Arc::new(DefaultClock),
    ///     )),
    ///     Arc::new(IssueCommandService::new(issues.clone())),
    ///     Arc::new(IssueQueryService::new(issues)),
    /// );
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        issues: Arc<dyn IssueCommand>,
        issues_query: Arc<dyn IssueQuery>,
    ) -> Self {
        Self {
            accounts,
            issues,
            issues_query,
        }
    }
}
