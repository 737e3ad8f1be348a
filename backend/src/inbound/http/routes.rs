//! Route table shared by the server binary and integration tests.
//!
//! Registers the three scopes and their extractor configs. Callers supply
//! `web::Data<HttpState>`, `web::Data<HealthState>` and the session
//! middleware.

use actix_web::web;

use crate::inbound::http::error::not_found;
use crate::inbound::http::issue_api::api_json_config;
use crate::inbound::http::validation::{form_config, json_config};
use crate::inbound::http::{auth_actions, health, issue_actions, issue_api};

/// Mount every endpoint and the fallback handler.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/actions")
            .app_data(form_config())
            .app_data(json_config())
            .service(auth_actions::sign_in)
            .service(auth_actions::sign_up)
            .service(auth_actions::sign_out)
            .service(issue_actions::create_issue)
            .service(issue_actions::update_issue)
            .service(issue_actions::delete_issue),
    )
    .service(
        web::scope("/api")
            .app_data(api_json_config())
            .service(issue_api::list_issues)
            .service(issue_api::get_issue)
            .service(issue_api::create_issue),
    )
    .service(health::ready)
    .service(health::live)
    .default_service(web::to(not_found));
}
