use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde::Deserialize;
use ulid::Ulid;

use super::AppState;
use crate::auth::{
    AUTH_COOKIE_NAME, STATE_COOKIE_NAME, authorize_url, build_cookie, build_state_cookie,
    decode_token, exchange_code,
};
use crate::error::AppError;

/// GET /login - hands the visitor to Google
pub async fn login(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let login_state = Ulid::new().to_string();
    let url = authorize_url(&state.config.auth, &login_state)?;

    Ok((jar.add(build_state_cookie(&login_state)), Redirect::to(&url)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /auth/callback - Google sends the visitor back here
#[tracing::instrument(skip_all)]
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    if let Some(error) = query.error {
        return Err(AppError::Login(error));
    }

    let expected = jar.get(STATE_COOKIE_NAME).map(|c| c.value().to_owned());
    match (expected.as_deref(), query.state.as_deref()) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return Err(AppError::Login("login state mismatch".to_owned())),
    }

    let code = query
        .code
        .ok_or_else(|| AppError::Login("missing authorization code".to_owned()))?;

    let identity = exchange_code(&state.http, &state.config.auth, &code).await?;
    let sid = Ulid::new().to_string();
    let cookie = build_cookie(&state.config.auth, &identity, &sid)?;

    tracing::info!(email = identity.email, "Signed in");

    let jar = jar
        .remove(Cookie::build(STATE_COOKIE_NAME).path("/"))
        .add(cookie);

    Ok((jar, Redirect::to("/")).into_response())
}

/// GET /logout - drops the server-side session and the auth cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(claims) = jar
        .get(AUTH_COOKIE_NAME)
        .and_then(|cookie| decode_token(&state.config.auth, cookie.value()).ok())
    {
        state.sessions.remove(claims.sid()).await;
        tracing::info!(email = claims.identity().email, "Signed out");
    }

    (
        jar.remove(Cookie::build(AUTH_COOKIE_NAME).path("/")),
        Redirect::to("/"),
    )
}
