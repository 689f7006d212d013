use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use trailhead_schedule::StoreError;

use crate::template::{ErrorTemplate, Template};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Schedule(#[from] trailhead_schedule::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Access denied for {0}")]
    AccessDenied(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Schedule(err.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .collect::<Vec<_>>()
            .join(" ");

        AppError::Validation(if message.is_empty() {
            err.to_string()
        } else {
            message
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use trailhead_schedule::Error as ScheduleError;

        let (status_code, error_title, error_message, retry) = match self {
            AppError::Schedule(ScheduleError::Store(e)) => {
                tracing::error!(error = %e, "Google Sheets request failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Google Sheets Unavailable".to_string(),
                    store_message(&e).to_string(),
                    Some("/".to_string()),
                )
            }
            AppError::Schedule(ScheduleError::InvalidTable(msg)) => {
                tracing::error!("Invalid worksheet: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Schedule Unreadable".to_string(),
                    format!("The schedule sheet could not be read: {msg}"),
                    Some("/".to_string()),
                )
            }
            AppError::Schedule(e @ ScheduleError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                "Not Found".to_string(),
                e.to_string(),
                None,
            ),
            AppError::Schedule(e @ ScheduleError::UnknownUser(_))
            | AppError::Schedule(e @ ScheduleError::UnknownDate(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Cannot Record Workout".to_string(),
                e.to_string(),
                None,
            ),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error".to_string(),
                msg,
                None,
            ),
            AppError::Login(msg) => {
                tracing::warn!("Login failed: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    "Login Failed".to_string(),
                    "We could not sign you in. Please log in again.".to_string(),
                    Some("/login".to_string()),
                )
            }
            AppError::AccessDenied(email) => (
                StatusCode::FORBIDDEN,
                "Access Denied".to_string(),
                format!("{email} does not have permission to view this app."),
                None,
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                    None,
                )
            }
        };

        Template::new(error_title.to_owned()).render_with_status(
            status_code,
            ErrorTemplate {
                status_code: status_code.as_u16(),
                error_title,
                error_message,
                retry,
            },
        )
    }
}

fn store_message(err: &StoreError) -> &'static str {
    match err {
        StoreError::Auth(_) => "Google Sheets rejected our credentials. Please try again.",
        StoreError::RateLimited => {
            "Google Sheets is receiving too many requests. Please wait a moment and try again."
        }
        StoreError::Network(_) => "Google Sheets could not be reached. Please try again.",
        StoreError::Http { .. } | StoreError::Decode(_) => {
            "Google Sheets returned an unexpected response. Please try again."
        }
    }
}
