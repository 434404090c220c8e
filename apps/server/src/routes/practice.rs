//! Practice endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use vocab_core::{is_repeat_command, select_session, AnswerEvaluator, MasteryTracker};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::store::Document;
use crate::AppState;

/// GET /api/practice/session
pub async fn session(
    State(app): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionResponse>> {
    let state = app.store.lock().await;
    let size = query.size.unwrap_or(state.settings.words_per_session);
    if size == 0 {
        return Err(ApiError::BadRequest("size must be at least 1".to_string()));
    }

    let words = select_session(
        &state.catalog.words,
        &state.progress.words,
        &state.settings,
        size,
        Utc::now(),
        &mut rand::rng(),
    );

    Ok(Json(SessionResponse {
        nothing_to_practice: words.is_empty(),
        words,
    }))
}

/// POST /api/practice/answer
pub async fn answer(
    State(app): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let mut state = app.store.lock().await;

    let word = state
        .catalog
        .get(&payload.word_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Word {} not found", payload.word_id)))?;

    if is_repeat_command(&payload.answer) {
        return Ok(Json(AnswerResponse {
            repeat: true,
            expected: word.target_term,
            ..Default::default()
        }));
    }

    let evaluator = AnswerEvaluator::from_settings(&state.settings);
    let evaluation = evaluator.evaluate(&payload.answer, &word.target_term, &word.synonyms);

    let tracker = MasteryTracker::from_settings(&state.settings);
    let mut next = state.clone();
    let outcome = next
        .progress
        .record_attempt(&tracker, &word.id, evaluation.accepted, Utc::now());
    app.store
        .commit(&mut state, next, &[Document::Progress])
        .await?;

    tracing::debug!(
        word_id = %word.id,
        correct = evaluation.accepted,
        rule = ?evaluation.rule,
        "answer graded"
    );

    Ok(Json(AnswerResponse {
        repeat: false,
        correct: evaluation.accepted,
        expected: word.target_term,
        cleaned_answer: evaluation.cleaned_answer,
        rule: evaluation.rule,
        matched: evaluation.matched,
        progress: Some(outcome.progress),
        newly_mastered: outcome.newly_mastered,
        demoted: outcome.demoted,
    }))
}
