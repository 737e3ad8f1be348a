//! HTTP inbound adapter.
//!
//! Three surfaces share one actix app:
//! - `/actions/*`: session-backed form actions answering an
//!   [`envelope::ActionResponse`].
//! - `/api/issue*`: the open JSON API with its own `{error}` body.
//! - `/health/*`: orchestration probes.

pub mod auth_actions;
pub mod envelope;
pub mod error;
pub mod health;
pub mod issue_actions;
pub mod issue_api;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
