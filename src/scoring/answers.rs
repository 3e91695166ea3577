// src/scoring/answers.rs

use std::collections::HashMap;

use serde_json::Value;

use crate::models::quiz::Question;

/// Likert responses live on a closed 1-5 scale.
const LIKERT_MIN: f64 = 1.0;
const LIKERT_MAX: f64 = 5.0;

/// Builds the numeric answer map for a Likert questionnaire.
///
/// Walks the quiz's question list and pulls each answer out of the raw
/// submission by question id (as string). Missing, non-numeric and
/// out-of-range values are dropped, never defaulted; each drop is logged
/// with the quiz and question id so partial submissions stay diagnosable.
/// Scoring then proceeds on whatever remains.
pub fn collect_numeric_answers(
    quiz_id: &str,
    questions: &[Question],
    raw_answers: &HashMap<String, Value>,
) -> HashMap<String, f64> {
    let mut numeric = HashMap::new();

    for question in questions {
        let q_id = question.id.to_string();

        let Some(raw) = raw_answers.get(&q_id) else {
            tracing::warn!(
                "Quiz {} QID {}: answer not found in submission, skipping",
                quiz_id,
                q_id
            );
            continue;
        };

        let Some(value) = numeric_value(raw) else {
            tracing::error!(
                "Quiz {} QID {}: non-numeric answer '{}', skipping",
                quiz_id,
                q_id,
                raw
            );
            continue;
        };

        if !(LIKERT_MIN..=LIKERT_MAX).contains(&value) {
            tracing::warn!(
                "Quiz {} QID {}: answer {} out of 1-5 range, skipping",
                quiz_id,
                q_id,
                value
            );
            continue;
        }

        numeric.insert(q_id, value);
    }

    numeric
}

/// Accepts JSON numbers and numeric strings; everything else is treated as
/// non-numeric.
fn numeric_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
