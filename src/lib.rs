pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod markdown;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod session;
pub mod template;

use std::{sync::Arc, time::Duration};

use trailhead_schedule::ScheduleRepository;

pub use config::Config;
pub use routes::AppState;
pub use session::{Clock, SessionStore, local_clock};

/// Build the application router with its page middleware.
///
/// Used by `serve` and by the integration tests, which pass an in-memory
/// repository and a fixed clock.
pub fn create_app(
    config: Config,
    repository: Arc<dyn ScheduleRepository>,
    clock: Clock,
) -> axum::Router {
    let session_ttl = Duration::from_secs(config.auth.jwt_expiration_days * 24 * 60 * 60);
    let state = AppState {
        config,
        repository,
        sessions: SessionStore::new(session_ttl),
        http: reqwest::Client::new(),
        clock,
    };

    routes::router(state)
        .layer(axum::middleware::from_fn(
            middleware::cache_control_middleware,
        ))
        .layer(axum::middleware::map_response(
            middleware::minify_html_middleware,
        ))
}
