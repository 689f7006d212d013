//! Access gate run at the top of every request.
//!
//! Priority: no valid auth cookie > email not on the allow-list > authorized.
//! Nothing here touches the schedule, so denied requests never reach
//! Google Sheets.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use std::convert::Infallible;

use crate::auth::{AUTH_COOKIE_NAME, Identity, decode_token};
use crate::routes::AppState;

/// A signed-in, allow-listed visitor and the server-side session they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub identity: Identity,
    pub sid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Unauthenticated,
    Denied(Identity),
    Authorized(Viewer),
}

pub fn is_allowed(email: &str, allow_list: &[String]) -> bool {
    allow_list
        .iter()
        .any(|allowed| allowed.trim().eq_ignore_ascii_case(email.trim()))
}

/// Decides access for an already verified identity.
pub fn gate(signed_in: Option<(Identity, String)>, allow_list: &[String]) -> Access {
    match signed_in {
        None => Access::Unauthenticated,
        Some((identity, _)) if !is_allowed(&identity.email, allow_list) => {
            Access::Denied(identity)
        }
        Some((identity, sid)) => Access::Authorized(Viewer { identity, sid }),
    }
}

impl FromRequestParts<AppState> for Access {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let signed_in = jar.get(AUTH_COOKIE_NAME).and_then(|cookie| {
            decode_token(&state.config.auth, cookie.value())
                .map_err(|e| tracing::warn!("Invalid auth token: {e}"))
                .ok()
                .map(|claims| (claims.identity(), claims.sid().to_owned()))
        });

        let access = gate(signed_in, &state.config.auth.authorized_users);

        if let Access::Denied(identity) = &access {
            tracing::warn!(email = identity.email, "Access denied");
        }

        Ok(access)
    }
}
