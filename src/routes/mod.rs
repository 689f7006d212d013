use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use trailhead_schedule::ScheduleRepository;

use crate::access::{Access, Viewer};
use crate::config::Config;
use crate::error::AppError;
use crate::session::{Clock, SessionStore};
use crate::template::{NotFoundTemplate, Template};

mod assets;
mod health;
mod login;
mod schedule;
mod workout;

pub use assets::AssetsService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn ScheduleRepository>,
    pub sessions: SessionStore,
    pub http: reqwest::Client,
    pub clock: Clock,
}

impl AppState {
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
}

#[derive(askama::Template)]
#[template(path = "access-denied.html")]
pub struct AccessDeniedTemplate {
    pub title: String,
    pub name: String,
    pub email: String,
}

/// Page requests: anyone not authorized gets the login or access-denied page.
pub(crate) fn page_viewer(template: &Template, access: Access) -> Result<Viewer, Response> {
    match access {
        Access::Authorized(viewer) => Ok(viewer),
        Access::Unauthenticated => Err(template.render(LoginTemplate {
            title: template.title.to_owned(),
        })),
        Access::Denied(identity) => Err(template.render_with_status(
            StatusCode::FORBIDDEN,
            AccessDeniedTemplate {
                title: template.title.to_owned(),
                name: identity.name,
                email: identity.email,
            },
        )),
    }
}

/// Form posts: signed-out visitors are sent back to the login page.
pub(crate) fn action_viewer(access: Access) -> Result<Viewer, Response> {
    match access {
        Access::Authorized(viewer) => Ok(viewer),
        Access::Unauthenticated => Err(axum::response::Redirect::to("/").into_response()),
        Access::Denied(identity) => Err(AppError::AccessDenied(identity.email).into_response()),
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_with_status(
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            title: template.title.to_owned(),
        },
    )
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(workout::page))
        .route("/navigate", post(workout::navigate))
        .route("/complete", post(workout::complete))
        .route("/schedule", get(schedule::page))
        .route("/login", get(login::login))
        .route("/auth/callback", get(login::callback))
        .route("/logout", get(login::logout))
        .nest_service("/static", AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
