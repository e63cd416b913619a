//! HTTP façade over the sandbox actions.
//!
//! Every route except `/health` sits behind the Basic-auth middleware in
//! [`auth`]. Handlers are thin: they turn a JSON body into a typed request,
//! call `SandboxActions`, and map the result onto a response.

pub mod auth;
pub mod error;
pub mod index;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use sandbox_deploy::application::CommandRunner;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Minimal health-check handler for load-balancer probes.
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Build the full router.
pub fn router<R: CommandRunner + 'static>(state: AppState<R>) -> Router {
    let protected = Router::new()
        .route("/", get(index::sandboxes_page::<R>))
        .route("/api/sandboxes", get(routes::sandboxes::<R>))
        .route("/api/pod-statuses", get(routes::pod_statuses::<R>))
        .route("/api/deploy", post(routes::deploy::<R>))
        .route("/api/delete", post(routes::delete::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth::require_basic_auth,
        ))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
}
