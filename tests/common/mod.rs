#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use serde_json::json;
use std::sync::Arc;
use todolist::auth::{CredentialHasher, SESSION_COOKIE};
use todolist::models::{Role, User};
use todolist::store::{MemoryStore, UserRepository};
use todolist::app::Storage;
use todolist::AppState;
use uuid::Uuid;

pub const TEST_SALT: &str = "integration-test-salt";
pub const PASSWORD: &str = "Test12414";

/// Application state over a fresh in-memory store, with direct store access
/// for seeding.
pub struct TestContext {
    pub state: web::Data<AppState>,
    pub store: Arc<MemoryStore>,
    pub hasher: CredentialHasher,
}

pub fn context() -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let hasher = CredentialHasher::new(TEST_SALT).expect("valid test salt");
    let state = AppState::new(
        Storage::Memory,
        store.clone(),
        store.clone(),
        store.clone(),
        hasher.clone(),
    );

    TestContext {
        state: web::Data::new(state),
        store,
        hasher,
    }
}

impl TestContext {
    /// Inserts an admin directly; the HTTP surface only creates plain users.
    pub async fn seed_admin(&self, login: &str) {
        let user = User {
            id: Uuid::new_v4(),
            login: login.to_string(),
            password_hash: self.hasher.hash(PASSWORD).expect("hashable password"),
            role: Role::Admin,
        };
        UserRepository::create(self.store.as_ref(), &user)
            .await
            .expect("admin seeded");
    }
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.into_owned())
}

async fn post_credentials(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    uri: &str,
    login: &str,
    password: &str,
) -> Result<Cookie<'static>, String> {
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(json!({ "login": login, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let cookie = session_cookie(&resp);
    let body = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "{} failed. Status: {}. Body: {}",
            uri,
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    cookie.ok_or_else(|| format!("{} did not set the session cookie", uri))
}

pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    login: &str,
) -> Result<Cookie<'static>, String> {
    post_credentials(app, "/user/register", login, PASSWORD).await
}

pub async fn login_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    login: &str,
) -> Result<Cookie<'static>, String> {
    post_credentials(app, "/user/login", login, PASSWORD).await
}

/// Status of a request the session middleware turns away before any handler
/// runs. Panics if the request got through.
pub async fn rejection_status(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> actix_web::http::StatusCode {
    match test::try_call_service(app, req).await {
        Ok(resp) => panic!("request was not rejected: {}", resp.status()),
        Err(err) => err.error_response().status(),
    }
}
