use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use valentine_types::api::ADMIN_KEY_HEADER;

use crate::state::AppState;

/// Compare the `X-Admin-Key` header with the configured secret. Passes
/// everything through when no secret is configured.
pub async fn require_admin_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if state.admin_key.is_empty() {
        return Ok(next.run(req).await);
    }

    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented != Some(state.admin_key.as_str()) {
        warn!("Rejected activity log read without a valid admin key");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}
