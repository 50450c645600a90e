use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use valentine_db::models::SelectionRow;
use valentine_types::api::{HealthResponse, SelectionDraft, SelectionRecord};
use valentine_types::email::is_valid_email;

use crate::state::AppState;

/// Most recent selections returned by the log endpoint.
pub const LIST_LIMIT: u32 = 100;

pub async fn create_selection(
    State(state): State<AppState>,
    Json(draft): Json<SelectionDraft>,
) -> Result<impl IntoResponse, StatusCode> {
    if let Some(email) = &draft.host_email {
        if !is_valid_email(email) {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    let record = draft.into_record(Uuid::new_v4(), Utc::now());

    let db = state.clone();
    let row = record.clone();
    tokio::task::spawn_blocking(move || db.db.insert_selection(&row))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("Failed to store selection: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!(
        "Selection {} recorded: {} ({})",
        record.id, record.activity_title, record.activity_id
    );

    if let (Some(notifier), Some(to)) = (state.notifier.clone(), record.host_email.clone()) {
        let record = record.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.selection_made(&to, &record).await {
                error!("Failed to send notification email: {}", e);
            }
        });
    }

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_selections(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_selections(LIST_LIMIT))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("Failed to load selections: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let records: Vec<SelectionRecord> = rows.into_iter().map(row_to_record).collect();
    Ok(Json(records))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        notifications: state.notifier.is_some(),
    })
}

fn row_to_record(row: SelectionRow) -> SelectionRecord {
    let timestamp = DateTime::parse_from_rfc3339(&row.created_at)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            warn!(
                "Corrupt created_at for selection {}: {:?} ({})",
                row.id, row.created_at, e
            );
            DateTime::<Utc>::default()
        });

    SelectionRecord {
        id: row.id,
        activity_id: row.activity_id,
        activity_title: row.activity_title,
        activity_emoji: row.activity_emoji,
        activity_response: row.activity_response,
        client_hint: row.client_hint,
        recipient_name: row.recipient_name,
        host_email: row.host_email,
        timestamp,
    }
}
