pub mod activity;
pub mod middleware;
pub mod notify;
pub mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::get,
};

use crate::middleware::require_admin_key;
use crate::state::AppState;

/// All API routes under `/api`. Writing a selection is open; reading the log
/// needs the admin key when one is configured.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/activity",
            get(activity::list_selections)
                .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_admin_key))
                .post(activity::create_selection),
        )
        .route("/health", get(activity::health));

    Router::new().nest("/api", api).with_state(state)
}
