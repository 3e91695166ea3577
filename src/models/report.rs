// src/models/report.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use std::collections::HashMap;

use crate::scoring::ScoreResult;

/// Represents the 'reports' table: the persisted outcome of one quiz
/// submission. Written once at submission time, never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Report {
    /// Opaque identifier: "rep_" followed by 10 hex characters.
    pub id: String,

    pub user_id: i64,

    pub quiz_id: String,
    pub quiz_title: String,
    pub quiz_description: String,

    /// Selects the interpretation path at read time: "bfi-10", "mas-12",
    /// "standard", or the quiz id verbatim when no scorer matched.
    pub report_type: String,

    pub score: Json<ScoreResult>,

    /// The raw submission exactly as received, retained for audit.
    pub answers_submitted: Json<HashMap<String, serde_json::Value>>,

    pub date_taken: chrono::DateTime<chrono::Utc>,
}

impl Report {
    pub fn generate_id() -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        format!("rep_{}", &hex[..10])
    }
}

/// Compact listing entry for a user's report history.
#[derive(Debug, Serialize, FromRow)]
pub struct ReportSummary {
    pub id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub report_type: String,
    pub date_taken: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting a quiz attempt. The answers arrive as a JSON-encoded
/// string, mapping question id (string) to the selected value.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: String,
}
