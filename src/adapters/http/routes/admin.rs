//! Read-only administration routes over the collected waitlist. Guarded by
//! the static bearer token middleware wired in `routes::router`.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    entities::WaitlistEntry,
    use_cases::admin::{WaitlistStats, export_filename},
};

#[derive(Deserialize)]
struct ListParams {
    search: Option<String>,
}

/// GET /api/admin/waitlist?search=
async fn list_entries(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<WaitlistEntry>>> {
    let entries = app_state
        .admin_use_cases
        .list(params.search.as_deref())
        .await?;
    Ok(Json(entries))
}

/// GET /api/admin/waitlist/stats
async fn stats(State(app_state): State<AppState>) -> AppResult<Json<WaitlistStats>> {
    Ok(Json(app_state.admin_use_cases.stats().await?))
}

/// GET /api/admin/waitlist/export
/// The full list as a date-stamped CSV download.
async fn export(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = app_state.admin_use_cases.export_csv().await?;
    let filename = export_filename(Utc::now().date_naive());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries))
        .route("/stats", get(stats))
        .route("/export", get(export))
}
