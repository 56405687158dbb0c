use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::security_headers_middleware;
use super::organizations;
use super::state::AppState;
use super::team;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Organization endpoints
        .route(
            "/orgs/default",
            post(organizations::ensure_default_organization),
        )
        .route("/orgs/{org_id}", get(organizations::get_organization))
        // Team endpoints
        .route(
            "/orgs/{org_id}/team",
            get(team::get_team).post(team::team_action),
        )
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
}
