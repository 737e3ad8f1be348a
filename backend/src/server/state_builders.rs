//! Builders for HTTP state: Diesel-backed when a pool is configured,
//! in-memory otherwise.

use std::sync::Arc;

use backend::domain::ports::{
    AccountCommand, IssueCommand, IssueQuery, IssueRepository, PasswordHasher, UserRepository,
};
use backend::domain::{AccountService, IssueCommandService, IssueQueryService};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryIssueRepository, InMemoryUserRepository};
use backend::outbound::persistence::{DieselIssueRepository, DieselUserRepository};
use backend::outbound::security::Argon2PasswordHasher;
use mockable::Clock;

use super::ServerConfig;

/// Wrap a user repository and hasher in the account service.
fn account_port<U, H>(users: U, hasher: H, clock: Arc<dyn Clock>) -> Arc<dyn AccountCommand>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    Arc::new(AccountService::new(Arc::new(users), Arc::new(hasher), clock))
}

/// Build the command and query services over one shared repository.
fn issue_ports<R>(repo: R) -> (Arc<dyn IssueCommand>, Arc<dyn IssueQuery>)
where
    R: IssueRepository + 'static,
{
    let repo = Arc::new(repo);
    (
        Arc::new(IssueCommandService::new(repo.clone())),
        Arc::new(IssueQueryService::new(repo)),
    )
}

fn assemble<U, H, R>(users: U, hasher: H, issues: R, clock: Arc<dyn Clock>) -> HttpState
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
    R: IssueRepository + 'static,
{
    let (issues, issues_query) = issue_ports(issues);
    HttpState::new(account_port(users, hasher, clock), issues, issues_query)
}

/// Select adapters for the configured storage.
pub(crate) fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    match &config.db_pool {
        Some(pool) => assemble(
            DieselUserRepository::new(pool.clone()),
            Argon2PasswordHasher::new(),
            DieselIssueRepository::new(pool.clone()),
            clock,
        ),
        None => build_memory_state(Argon2PasswordHasher::new(), clock),
    }
}

/// In-memory adapters; everything is lost on restart.
fn build_memory_state<H>(hasher: H, clock: Arc<dyn Clock>) -> HttpState
where
    H: PasswordHasher + 'static,
{
    assemble(
        InMemoryUserRepository::new(),
        hasher,
        InMemoryIssueRepository::new(clock.clone()),
        clock,
    )
}
