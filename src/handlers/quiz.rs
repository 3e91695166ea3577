// src/handlers/quiz.rs

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::types::Json as DbJson;

use crate::{
    error::AppError,
    models::{
        quiz::{PublicQuiz, QuizSummary},
        report::{Report, SubmitQuizRequest},
    },
    quizzes::QuizCatalog,
    scoring::score_submission,
    store::ReportStore,
    utils::jwt::Claims,
};

/// Lists the available quizzes as compact summaries.
pub async fn list_quizzes(
    State(quizzes): State<Arc<QuizCatalog>>,
) -> Result<impl IntoResponse, AppError> {
    let summaries: Vec<QuizSummary> = quizzes.all().iter().map(QuizSummary::from).collect();
    Ok(Json(summaries))
}

/// Returns one quiz with its questions, stripped of scoring keys and
/// canonical answers.
pub async fn get_quiz(
    State(quizzes): State<Arc<QuizCatalog>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes
        .find(&quiz_id)
        .ok_or_else(|| AppError::NotFound(format!("Quiz ID: {} not found.", quiz_id)))?;

    Ok(Json(PublicQuiz::from(quiz)))
}

/// Submits a user's quiz answers, scores them and persists a report.
///
/// * The `answers` field is a JSON-encoded map of question id to value;
///   malformed JSON is rejected before any scoring or persistence happens.
/// * Scoring strategy and report type are selected by the quiz identifier.
/// * Returns 201 Created with the new report id.
pub async fn submit_quiz(
    State(quizzes): State<Arc<QuizCatalog>>,
    State(reports): State<ReportStore>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    tracing::info!("Quiz submission: {} by user {}", quiz_id, user_id);

    let quiz = quizzes.find(&quiz_id).ok_or_else(|| {
        tracing::error!("Quiz ID {} not found during submission", quiz_id);
        AppError::NotFound(format!("Quiz ID: {} not found.", quiz_id))
    })?;

    let raw_answers: HashMap<String, Value> = serde_json::from_str(&req.answers).map_err(|e| {
        tracing::error!(
            "Invalid answers JSON for {} from user {}: {}",
            quiz_id,
            user_id,
            e
        );
        AppError::BadRequest("Invalid answers format.".to_string())
    })?;

    let scored = score_submission(quiz, &raw_answers);
    tracing::info!(
        "User {} scored quiz {}: {:?}",
        user_id,
        quiz_id,
        scored.score
    );

    let report = Report {
        id: Report::generate_id(),
        user_id,
        quiz_id: quiz.id.clone(),
        quiz_title: quiz.title.clone(),
        quiz_description: quiz.description.clone(),
        report_type: scored.report_type,
        score: DbJson(scored.score),
        answers_submitted: DbJson(raw_answers),
        date_taken: Utc::now(),
    };

    reports.insert(&report).await?;
    tracing::info!("New report {} saved for user {}", report.id, user_id);

    Ok((StatusCode::CREATED, Json(json!({ "report_id": report.id }))))
}
