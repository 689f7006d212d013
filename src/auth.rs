use std::time::{SystemTime, UNIX_EPOCH};

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AppError;

pub const AUTH_COOKIE_NAME: &str = "trailhead_token";
pub const STATE_COOKIE_NAME: &str = "trailhead_login_state";

const ISSUER: &str = "trailhead";
const AUDIENCE: &str = "trailhead";

/// Who the identity provider says is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
    pub given_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
    name: String,
    given_name: String,
    /// Server-side session the token belongs to.
    sid: String,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            email: self.sub.to_owned(),
            name: self.name.to_owned(),
            given_name: self.given_name.to_owned(),
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }
}

pub fn generate_token(config: &AuthConfig, identity: &Identity, sid: &str) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: AUDIENCE.to_owned(),
        exp: now + config.jwt_expiration_days * 24 * 60 * 60,
        iat: now,
        iss: ISSUER.to_owned(),
        sub: identity.email.to_owned(),
        name: identity.name.to_owned(),
        given_name: identity.given_name.to_owned(),
        sid: sid.to_owned(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn decode_token(config: &AuthConfig, token: &str) -> jsonwebtoken::errors::Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_audience(&[AUDIENCE]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

pub fn build_cookie(config: &AuthConfig, identity: &Identity, sid: &str) -> anyhow::Result<Cookie<'static>> {
    let token = generate_token(config, identity, sid)?;

    Ok(Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build())
}

/// The provider redirects back cross-site, so this one cannot be `Strict`.
pub fn build_state_cookie(state: &str) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE_NAME, state.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Google OpenID Connect authorization-code flow.
pub fn authorize_url(config: &AuthConfig, state: &str) -> Result<String, AppError> {
    let url = url::Url::parse_with_params(
        &config.authorize_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_url.as_str()),
            ("scope", "openid email profile"),
            ("state", state),
            ("prompt", "select_account"),
        ],
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(url.into())
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    email: String,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
}

impl From<UserInfo> for Identity {
    fn from(info: UserInfo) -> Self {
        let local_part = info
            .email
            .split_once('@')
            .map(|(local, _)| local.to_owned())
            .unwrap_or_else(|| info.email.to_owned());
        let name = info.name.unwrap_or_else(|| local_part.to_owned());
        let given_name = info
            .given_name
            .or_else(|| name.split_whitespace().next().map(str::to_owned))
            .unwrap_or(local_part);

        Identity {
            email: info.email,
            name,
            given_name,
        }
    }
}

/// Trades the authorization code for the signed-in user's identity.
#[tracing::instrument(skip_all)]
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &AuthConfig,
    code: &str,
) -> Result<Identity, AppError> {
    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", config.redirect_url.as_str()),
        ])
        .send()
        .await
        .map_err(|e| AppError::Login(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AppError::Login(format!(
            "token endpoint returned {}",
            response.status()
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AppError::Login(e.to_string()))?;

    let response = http
        .get(&config.userinfo_url)
        .bearer_auth(&token.access_token)
        .send()
        .await
        .map_err(|e| AppError::Login(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AppError::Login(format!(
            "userinfo endpoint returned {}",
            response.status()
        )));
    }

    let info: UserInfo = response
        .json()
        .await
        .map_err(|e| AppError::Login(e.to_string()))?;

    if info.email_verified == Some(false) {
        return Err(AppError::Login(format!("{} is not verified", info.email)));
    }

    Ok(info.into())
}
