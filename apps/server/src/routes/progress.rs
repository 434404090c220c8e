//! Known-word endpoints: manual marks, bulk import and export

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use vocab_core::catalog::split_known_terms;
use vocab_core::stats::export_known;
use vocab_core::MasteryTracker;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::store::Document;
use crate::AppState;

/// POST /api/progress/:id/known
///
/// Toggles the manual mark.
pub async fn toggle_known(
    State(app): State<AppState>,
    Path(word_id): Path<String>,
) -> Result<Json<WordProgress>> {
    let mut state = app.store.lock().await;
    if state.catalog.get(&word_id).is_none() {
        return Err(ApiError::NotFound(format!("Word {word_id} not found")));
    }

    let tracker = MasteryTracker::from_settings(&state.settings);
    let mut next = state.clone();
    let updated = next.progress.toggle_manual_mark(&tracker, &word_id, Utc::now());
    app.store
        .commit(&mut state, next, &[Document::Progress])
        .await?;

    Ok(Json(updated))
}

/// POST /api/known/all
pub async fn mark_all(State(app): State<AppState>) -> Result<Json<MarkKnownResponse>> {
    let mut state = app.store.lock().await;
    let tracker = MasteryTracker::from_settings(&state.settings);
    let now = Utc::now();

    let mut next = state.clone();
    let ids: Vec<String> = next.catalog.words.iter().map(|w| w.id.clone()).collect();
    for id in &ids {
        next.progress.mark_known(&tracker, id, now);
    }
    app.store
        .commit(&mut state, next, &[Document::Progress])
        .await?;

    tracing::info!(count = ids.len(), "marked every word known");
    Ok(Json(MarkKnownResponse {
        marked: ids.len(),
        unmatched: Vec::new(),
    }))
}

/// POST /api/known/import
///
/// Terms may be separated by newlines, commas or semicolons and match a
/// word's source term, target term or any synonym.
pub async fn import(
    State(app): State<AppState>,
    Json(request): Json<ImportKnownRequest>,
) -> Result<Json<MarkKnownResponse>> {
    let terms = split_known_terms(&request.text);
    if terms.is_empty() {
        return Err(ApiError::BadRequest("no terms given".to_string()));
    }

    let mut state = app.store.lock().await;
    let tracker = MasteryTracker::from_settings(&state.settings);
    let now = Utc::now();

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    for term in terms {
        match state.catalog.find_by_term(&term) {
            Some(item) => matched.push(item.id.clone()),
            None => unmatched.push(term),
        }
    }
    matched.sort();
    matched.dedup();

    if !matched.is_empty() {
        let mut next = state.clone();
        for id in &matched {
            next.progress.mark_known(&tracker, id, now);
        }
        app.store
            .commit(&mut state, next, &[Document::Progress])
            .await?;
    }

    tracing::info!(marked = matched.len(), unmatched = unmatched.len(), "known words imported");
    Ok(Json(MarkKnownResponse {
        marked: matched.len(),
        unmatched,
    }))
}

/// GET /api/known/export
pub async fn export(State(app): State<AppState>) -> Result<Json<ExportResponse>> {
    let state = app.store.lock().await;
    let terms = export_known(&state.catalog.words, &state.progress);

    Ok(Json(ExportResponse {
        count: terms.len(),
        text: terms.join("\n"),
    }))
}
