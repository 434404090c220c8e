//! Statistics endpoint

use axum::{extract::State, Json};
use chrono::Utc;
use vocab_core::stats;

use crate::error::Result;
use crate::models::StatisticsReport;
use crate::AppState;

/// GET /api/stats
pub async fn report(State(app): State<AppState>) -> Result<Json<StatisticsReport>> {
    let state = app.store.lock().await;
    Ok(Json(stats::compute(
        &state.catalog.words,
        &state.progress,
        Utc::now(),
    )))
}
