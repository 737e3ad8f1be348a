//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! A thin wrapper around the actix cookie session: handlers bind a user id
//! on sign-in or sign-up, read it back to derive the [`Caller`], and end the
//! session on sign-out.

use actix_session::{Session, SessionStatus};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Caller, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the authenticated user's id to a fresh session.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// The caller behind this request; unreadable sessions count as anonymous.
    pub fn caller(&self) -> Caller {
        match self.user_id() {
            Ok(user_id) => Caller::from_session(user_id),
            Err(error) => {
                tracing::warn!(error = %error, "unreadable session treated as anonymous");
                Caller::Anonymous
            }
        }
    }

    /// Destroy the session and instruct the client to drop its cookie.
    ///
    /// Purging a cookie session cannot fail: state is cleared in place and
    /// the middleware answers with a removal cookie. A failure to write that
    /// response is reported by the session middleware itself.
    pub fn end(&self) {
        self.0.purge();
    }

    /// Whether [`SessionContext::end`] has run for this request.
    pub fn is_ended(&self) -> bool {
        self.0.status() == SessionStatus::Purged
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = actix_test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6")
                            .expect("fixture id");
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.user_id()?.map(|id| id.to_string());
                        Ok::<_, Error>(HttpResponse::Ok().body(id.unwrap_or_default()))
                    }),
                ),
        )
        .await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = actix_test::read_body(get_res).await;
        assert_eq!(body, "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[actix_web::test]
    async fn ended_session_drops_user() {
        let app = actix_test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&UserId::random())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/end",
                    web::get().to(|session: SessionContext| async move {
                        session.end();
                        assert!(session.is_ended());
                        HttpResponse::Ok()
                    }),
                ),
        )
        .await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let end_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/end").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(end_res.status(), StatusCode::OK);
        let removal = end_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie set");
        assert_eq!(removal.value(), "");
    }

    #[actix_web::test]
    async fn anonymous_request_yields_anonymous_caller() {
        let app = actix_test::init_service(session_test_app().route(
            "/caller",
            web::get().to(|session: SessionContext| async move {
                HttpResponse::Ok().body(session.caller().to_string())
            }),
        ))
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/caller").to_request()).await;
        let body = actix_test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn tampered_user_id_counts_as_anonymous() {
        let app = actix_test::init_service(
            session_test_app()
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/caller",
                    web::get().to(|session: SessionContext| async move {
                        HttpResponse::Ok().body(session.caller().to_string())
                    }),
                ),
        )
        .await;

        let set_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/caller")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = actix_test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }
}
