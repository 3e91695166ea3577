// src/store.rs

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::report::{Report, ReportSummary};
use crate::state::AppState;

/// Handle to the report document store.
///
/// Reports are written once at submission time and read back only by exact
/// (id, user_id) match, so per-user isolation is enforced at the query
/// level rather than by application ACLs. The handle is constructed from
/// the pool opened in `main` and passed in through application state.
#[derive(Clone)]
pub struct ReportStore {
    pool: SqlitePool,
}

impl ReportStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, report: &Report) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO reports
                (id, user_id, quiz_id, quiz_title, quiz_description,
                 report_type, score, answers_submitted, date_taken)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&report.id)
        .bind(report.user_id)
        .bind(&report.quiz_id)
        .bind(&report.quiz_title)
        .bind(&report.quiz_description)
        .bind(&report.report_type)
        .bind(&report.score)
        .bind(&report.answers_submitted)
        .bind(report.date_taken)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report {}: {:?}", report.id, e);
            AppError::from(e)
        })?;
        Ok(())
    }

    pub async fn find(&self, report_id: &str, user_id: i64) -> Result<Option<Report>, AppError> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            SELECT id, user_id, quiz_id, quiz_title, quiz_description,
                   report_type, score, answers_submitted, date_taken
            FROM reports
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(report_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch report {}: {:?}", report_id, e);
            AppError::from(e)
        })?;
        Ok(report)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<ReportSummary>, AppError> {
        let summaries = sqlx::query_as::<_, ReportSummary>(
            r#"
            SELECT id, quiz_id, quiz_title, report_type, date_taken
            FROM reports
            WHERE user_id = ?
            ORDER BY date_taken DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports for user {}: {:?}", user_id, e);
            AppError::from(e)
        })?;
        Ok(summaries)
    }
}

impl FromRef<AppState> for ReportStore {
    fn from_ref(state: &AppState) -> Self {
        ReportStore::new(state.pool.clone())
    }
}
