//! End-to-end HTTP behaviour over the in-memory adapters.
//!
//! Wires the real services, session middleware and trace middleware the way
//! the server does, minus the database.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::{AccountService, IssueCommandService, IssueQueryService, TRACE_ID_HEADER};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::routes::configure;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryIssueRepository, InMemoryUserRepository};
use backend::outbound::security::Argon2PasswordHasher;

fn memory_state() -> HttpState {
    let clock = Arc::new(DefaultClock);
    let params = Params::new(8, 1, 1, None).expect("valid test params");
    let issues = Arc::new(InMemoryIssueRepository::new(clock.clone()));
    HttpState::new(
        Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2PasswordHasher::with_params(params)),
            clock,
        )),
        Arc::new(IssueCommandService::new(issues.clone())),
        Arc::new(IssueQueryService::new(issues)),
    )
}

async fn app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health = HealthState::new();
    health.mark_ready();
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .app_data(web::Data::new(health))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_name("session".to_owned())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

async fn sign_up<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/actions/sign-up")
        .set_form([
            ("email", email),
            ("password", "secret1"),
            ("confirmPassword", "secret1"),
        ])
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let cookie = session_cookie(&response).expect("sign-up issues a session cookie");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], json!(true));
    cookie
}

async fn json_of(response: ServiceResponse) -> (StatusCode, Value) {
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[actix_web::test]
async fn signed_in_user_manages_issue_lifecycle() {
    let app = app().await;
    let cookie = sign_up(&app, "ada@example.com").await;

    let create = actix_test::TestRequest::post()
        .uri("/actions/issues")
        .cookie(cookie.clone())
        .set_json(json!({
            "title": "Login button does nothing",
            "description": "",
            "status": "todo",
            "priority": "high",
            "userId": "u1"
        }))
        .to_request();
    let (_, body) = json_of(actix_test::call_service(&app, create).await).await;
    assert_eq!(body, json!({"success": true, "message": "Issue created successfully"}));

    let (status, listed) = json_of(
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/issue").to_request()).await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let issue = &listed[0];
    assert_eq!(issue["id"], json!(1));
    assert_eq!(issue["description"], Value::Null);

    let update = actix_test::TestRequest::patch()
        .uri("/actions/issues/1")
        .cookie(cookie.clone())
        .set_json(json!({"status": "done"}))
        .to_request();
    let (_, body) = json_of(actix_test::call_service(&app, update).await).await;
    assert_eq!(body["message"], json!("Issue updated successfully"));

    let (_, fetched) = json_of(
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/issue/1").to_request()).await,
    )
    .await;
    assert_eq!(fetched["status"], json!("done"));
    assert_eq!(fetched["title"], issue["title"]);
    assert_eq!(fetched["priority"], issue["priority"]);

    let delete = actix_test::TestRequest::delete()
        .uri("/actions/issues/1")
        .cookie(cookie)
        .to_request();
    let (_, body) = json_of(actix_test::call_service(&app, delete).await).await;
    assert_eq!(body["message"], json!("Issue deleted successfully"));

    let (status, body) = json_of(
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/issue/1").to_request()).await,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Issue not found"}));
}

#[actix_web::test]
async fn anonymous_actions_are_refused_and_write_nothing() {
    let app = app().await;
    let create = actix_test::TestRequest::post()
        .uri("/actions/issues")
        .set_json(json!({"title": "Fix bug", "userId": "u1"}))
        .to_request();
    let (status, body) = json_of(actix_test::call_service(&app, create).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Unauthorized access"));

    let (_, listed) = json_of(
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/issue").to_request()).await,
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = app().await;
    sign_up(&app, "ada@example.com").await;

    let mut bodies = Vec::new();
    for (email, password) in [("ada@example.com", "wrong-1"), ("bob@example.com", "secret1")] {
        let request = actix_test::TestRequest::post()
            .uri("/actions/sign-in")
            .set_form([("email", email), ("password", password)])
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(session_cookie(&response).is_none());
        bodies.push(actix_test::read_body(response).await);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[actix_web::test]
async fn sign_in_after_sign_up_issues_new_session() {
    let app = app().await;
    sign_up(&app, "ada@example.com").await;

    let request = actix_test::TestRequest::post()
        .uri("/actions/sign-in")
        .set_form([("email", "  Ada@Example.com "), ("password", "secret1")])
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert!(session_cookie(&response).is_some());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Signed in successfully"));
}

#[actix_web::test]
async fn duplicate_sign_up_is_attributed_to_email() {
    let app = app().await;
    sign_up(&app, "ada@example.com").await;

    let request = actix_test::TestRequest::post()
        .uri("/actions/sign-up")
        .set_form([
            ("email", "ada@example.com"),
            ("password", "another1"),
            ("confirmPassword", "another1"),
        ])
        .to_request();
    let (_, body) = json_of(actix_test::call_service(&app, request).await).await;

    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["errors"]["email"],
        json!(["An account with this email already exists"])
    );
}

#[actix_web::test]
async fn sign_out_redirects_and_clears_cookie() {
    let app = app().await;
    let cookie = sign_up(&app, "ada@example.com").await;

    let request = actix_test::TestRequest::post()
        .uri("/actions/sign-out")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/signin")
    );
    let removal = session_cookie(&response).expect("removal cookie");
    assert!(removal.value().is_empty());
}

#[rstest]
#[case(json!({"title": "Fix bug"}), StatusCode::BAD_REQUEST)]
#[case(json!({"title": "Fix bug", "userId": "u1"}), StatusCode::CREATED)]
#[case(json!({"title": "ab", "userId": "u1"}), StatusCode::BAD_REQUEST)]
#[actix_rt::test]
async fn api_create_statuses(#[case] payload: Value, #[case] expected: StatusCode) {
    let app = app().await;
    let request = actix_test::TestRequest::post()
        .uri("/api/issue")
        .set_json(payload)
        .to_request();
    let (status, body) = json_of(actix_test::call_service(&app, request).await).await;

    assert_eq!(status, expected);
    if expected == StatusCode::CREATED {
        assert_eq!(body["issue"]["status"], json!("backlog"));
        assert_eq!(body["issue"]["priority"], json!("medium"));
    } else {
        assert!(body["error"].is_string());
    }
}

#[rstest]
#[case("/health/ready")]
#[case("/api/issue")]
#[case("/no/such/route")]
#[actix_rt::test]
async fn every_response_carries_trace_id(#[case] uri: &str) {
    let app = app().await;
    let response = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert!(response.headers().contains_key(TRACE_ID_HEADER));
}
