// src/handlers/report.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    models::report::Report,
    scoring::ScoreResult,
    scoring::charts::{bfi10_radar_series, mas12_pie_series},
    scoring::engine::{BFI10_QUIZ_ID, MAS12_QUIZ_ID},
    scoring::interpret::{bfi10_rows, mas12_rows},
    store::ReportStore,
    utils::jwt::Claims,
};

/// Lists the current user's reports, newest first.
pub async fn list_reports(
    State(reports): State<ReportStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let summaries = reports.list_for_user(user_id).await?;
    tracing::debug!("User {} has {} reports", user_id, summaries.len());
    Ok(Json(summaries))
}

/// Fetches one report by id for the current user and assembles its
/// rendering payload.
///
/// The lookup matches on (id, user_id), so another user's report id
/// resolves to 404 rather than leaking data.
pub async fn get_report(
    State(reports): State<ReportStore>,
    Extension(claims): Extension<Claims>,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    tracing::info!("User {} requesting report {}", user_id, report_id);

    let report = reports.find(&report_id, user_id).await?.ok_or_else(|| {
        tracing::warn!("Report {} not found or access denied for user {}", report_id, user_id);
        AppError::NotFound(format!("Report {} not found.", report_id))
    })?;

    Ok(Json(build_report_view(&report)))
}

/// Assembles the rendering payload for one report. The report_type tag
/// recorded at submission time selects the interpretation path; anything
/// unrecognized falls through to the bare report.
fn build_report_view(report: &Report) -> Value {
    match (report.report_type.as_str(), &report.score.0) {
        (BFI10_QUIZ_ID, ScoreResult::Averages(scores)) => json!({
            "report": report,
            "chart": bfi10_radar_series(scores),
            "rows": bfi10_rows(scores),
        }),
        (MAS12_QUIZ_ID, ScoreResult::Averages(scores)) => json!({
            "report": report,
            "chart": mas12_pie_series(scores),
            "rows": mas12_rows(scores),
        }),
        _ => json!({ "report": report }),
    }
}
