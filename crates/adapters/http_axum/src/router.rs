//! Axum router assembly.

use axum::Router;
use axum::routing::{any, get, post};
use tower_http::trace::TraceLayer;

use pont_app::ports::{ControlChannel, SnapshotStore};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<C, S>(state: AppState<C, S>) -> Router
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    Router::new()
        .route("/", get(crate::dashboard::index))
        .route("/health", get(health_check))
        .route("/api/set_threshold", post(crate::api::set_threshold))
        .route("/ws", any(crate::ws::state_socket))
        .route("/ws/terminal", any(crate::ws::terminal_socket))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
