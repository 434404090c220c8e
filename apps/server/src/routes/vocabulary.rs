//! Vocabulary catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use vocab_core::catalog::parse_bulk;
use vocab_core::AddOutcome;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::store::{Document, StoreState};
use crate::AppState;

fn row(state: &StoreState, item: &VocabularyItem) -> VocabularyRow {
    let progress = state.progress.get(&item.id);
    VocabularyRow {
        item: item.clone(),
        known: progress.is_some_and(WordProgress::is_mastered),
        state: MasteryState::of(progress),
        custom: state.is_custom(&item.id),
    }
}

/// GET /api/vocabulary
pub async fn list(
    State(app): State<AppState>,
    Query(query): Query<VocabularyQuery>,
) -> Result<Json<VocabularyListResponse>> {
    let state = app.store.lock().await;

    let words: Vec<VocabularyRow> = state
        .catalog
        .search(query.q.as_deref().unwrap_or_default())
        .into_iter()
        .map(|item| row(&state, item))
        .collect();

    Ok(Json(VocabularyListResponse {
        total: words.len(),
        words,
        categories: state.catalog.categories(),
    }))
}

/// POST /api/vocabulary
pub async fn create(
    State(app): State<AppState>,
    Json(word): Json<NewWord>,
) -> Result<(StatusCode, Json<VocabularyItem>)> {
    if word.source_term.trim().is_empty() || word.target_term.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "sourceTerm and targetTerm are required".to_string(),
        ));
    }

    let mut state = app.store.lock().await;
    let mut next = state.clone();
    let item = match next.catalog.add(word) {
        AddOutcome::Added(item) => item,
        AddOutcome::Duplicate(existing) => {
            return Err(ApiError::Conflict(format!(
                "\"{}\" already exists as {}",
                existing.source_term, existing.id
            )));
        }
    };

    next.custom_words.push(item.clone());
    app.store
        .commit(&mut state, next, &[Document::CustomWords])
        .await?;

    tracing::info!(word_id = %item.id, source = %item.source_term, "custom word added");
    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /api/vocabulary/bulk
pub async fn bulk_create(
    State(app): State<AppState>,
    Json(request): Json<BulkAddRequest>,
) -> Result<Json<BulkAddResponse>> {
    let parsed = parse_bulk(&request.text);
    if parsed.entries.is_empty() && parsed.errors.is_empty() {
        return Err(ApiError::BadRequest("no words to add".to_string()));
    }

    let mut state = app.store.lock().await;
    let mut next = state.clone();
    let mut added = Vec::new();
    let mut duplicates = Vec::new();

    for entry in parsed.entries {
        match next.catalog.add(entry) {
            AddOutcome::Added(item) => {
                next.custom_words.push(item.clone());
                added.push(item);
            }
            AddOutcome::Duplicate(existing) => duplicates.push(existing.source_term),
        }
    }

    if !added.is_empty() {
        app.store
            .commit(&mut state, next, &[Document::CustomWords])
            .await?;
    }

    tracing::info!(
        added = added.len(),
        duplicates = duplicates.len(),
        errors = parsed.errors.len(),
        "bulk add"
    );

    Ok(Json(BulkAddResponse {
        added,
        duplicates,
        errors: parsed.errors.iter().map(ToString::to_string).collect(),
    }))
}

/// PUT /api/vocabulary/:id
///
/// Custom words are edited in place; shipped words get an override.
pub async fn update(
    State(app): State<AppState>,
    Path(word_id): Path<String>,
    Json(edit): Json<WordEdit>,
) -> Result<Json<VocabularyItem>> {
    let edit = edit.cleaned().ok_or_else(|| {
        ApiError::BadRequest("sourceTerm and targetTerm are required".to_string())
    })?;

    let mut state = app.store.lock().await;
    let mut next = state.clone();
    if !next.catalog.edit(&word_id, &edit) {
        return Err(ApiError::NotFound(format!("Word {word_id} not found")));
    }

    let updated = next
        .catalog
        .get(&word_id)
        .cloned()
        .ok_or_else(|| ApiError::Internal(format!("word {word_id} vanished after edit")))?;

    let document = if next.is_custom(&word_id) {
        if let Some(custom) = next.custom_words.iter_mut().find(|w| w.id == word_id) {
            *custom = updated.clone();
        }
        Document::CustomWords
    } else {
        next.overrides.insert(word_id.clone(), edit);
        Document::Overrides
    };
    app.store.commit(&mut state, next, &[document]).await?;

    Ok(Json(updated))
}

/// DELETE /api/vocabulary/:id
///
/// Removes the word and its progress record.
pub async fn delete(
    State(app): State<AppState>,
    Path(word_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut state = app.store.lock().await;
    let mut next = state.clone();
    if next.catalog.remove(&word_id).is_none() {
        return Err(ApiError::NotFound(format!("Word {word_id} not found")));
    }

    let mut documents = vec![Document::Progress];
    if next.is_custom(&word_id) {
        next.custom_words.retain(|w| w.id != word_id);
        documents.push(Document::CustomWords);
    } else {
        next.deleted.insert(word_id.clone());
        documents.push(Document::DeletedWords);
        if next.overrides.remove(&word_id).is_some() {
            documents.push(Document::Overrides);
        }
    }
    next.progress.remove(&word_id);
    app.store.commit(&mut state, next, &documents).await?;

    tracing::info!(word_id = %word_id, "word deleted");
    Ok(Json(DeleteResponse { deleted: word_id }))
}
