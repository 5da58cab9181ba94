use crate::{
    app::AppState,
    auth::{Credentials, SESSION_COOKIE},
    error::AppError,
    models::session::SESSION_TTL_HOURS,
};
use actix_web::cookie::{time::Duration, Cookie};
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .max_age(Duration::hours(SESSION_TTL_HOURS))
        .finish()
}

/// Register a new user
///
/// Creates the account, opens its first session and returns the user.
///
/// ## Responses:
/// - `201 Created`: the new user; the `session_id` cookie is set.
/// - `400 Bad Request`: the login is taken or the body is not valid JSON.
/// - `422 Unprocessable Entity`: login or password fails validation.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let user = state.users.register(&credentials).await?;
    let session = state.sessions.create_token(user.id).await?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(session.token))
        .json(user))
}

/// Login user
///
/// Verifies the credentials and replaces the user's session with a fresh one.
///
/// ## Responses:
/// - `200 OK`: the user; the `session_id` cookie is set.
/// - `401 Unauthorized`: unknown login or wrong password.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let user = state.users.login(&credentials).await?;
    let session = state.sessions.update_token(user.id).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(session.token))
        .json(user))
}

/// Logout user
///
/// Revokes the session named by the cookie, if any, and clears the cookie.
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await?;
    }

    let mut removal = session_cookie(String::new());
    removal.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(serde_json::json!({ "status": "logged out" })))
}
