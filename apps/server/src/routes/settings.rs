//! Settings endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::store::{Document, StoreState};
use crate::AppState;

/// GET /api/settings
pub async fn get(State(app): State<AppState>) -> Result<Json<Settings>> {
    let state = app.store.lock().await;
    Ok(Json(state.settings.clone()))
}

/// PUT /api/settings
///
/// Applies only the fields present; the result must validate before it is
/// stored.
pub async fn update(
    State(app): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>> {
    let mut state = app.store.lock().await;
    let mut updated = state.settings.clone();

    if let Some(mastery_threshold) = request.mastery_threshold {
        updated.mastery_threshold = mastery_threshold;
    }
    if let Some(excluded_categories) = request.excluded_categories {
        updated.excluded_categories = excluded_categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }
    if let Some(words_per_session) = request.words_per_session {
        updated.words_per_session = words_per_session;
    }
    if let Some(token_similarity_threshold) = request.token_similarity_threshold {
        updated.token_similarity_threshold = token_similarity_threshold;
    }
    if let Some(phrase_similarity_threshold) = request.phrase_similarity_threshold {
        updated.phrase_similarity_threshold = phrase_similarity_threshold;
    }
    if let Some(demotion_ratio) = request.demotion_ratio {
        updated.demotion_ratio = demotion_ratio;
    }

    updated.validate()?;
    let next = StoreState {
        settings: updated,
        ..state.clone()
    };
    app.store
        .commit(&mut state, next, &[Document::Settings])
        .await?;

    tracing::info!(settings = ?state.settings, "settings updated");
    Ok(Json(state.settings.clone()))
}
