// src/scoring/engine.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::answers::collect_numeric_answers;
use crate::models::quiz::{Question, Quiz};

pub const BFI10_QUIZ_ID: &str = "bfi-10";
pub const MAS12_QUIZ_ID: &str = "mas-12";
pub const STANDARD_REPORT_TYPE: &str = "standard";
pub const SCORING_NOT_IMPLEMENTED: &str = "N/A - Scoring not implemented for this quiz type";

/// The five BFI-10 trait buckets, in display order. The single-letter code
/// is the first character of a question's scoring key.
pub const BFI10_TRAITS: [(char, &str); 5] = [
    ('E', "Extraversion"),
    ('A', "Agreeableness"),
    ('C', "Conscientiousness"),
    ('N', "Neuroticism"),
    ('O', "Openness"),
];

/// The four MAS-12 subscale buckets, in display order, keyed by the short
/// code used in quiz files.
pub const MAS12_SUBSCALES: [(&str, &str); 4] = [
    ("PP", "Power-Prestige"),
    ("RT", "Retention-Time"),
    ("D", "Distrust"),
    ("A", "Anxiety"),
];

/// Suffix marking a reverse-keyed BFI-10 item.
const REVERSAL_SUFFIX: &str = "_R";

/// Outcome of scoring one submission: per-category rounded averages for the
/// questionnaire strategies, or a formatted percentage / marker string.
///
/// A category maps to `None` when no valid answer contributed. Downstream
/// rendering shows this as "N/A"; it must never collapse into zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreResult {
    Averages(BTreeMap<String, Option<f64>>),
    Text(String),
}

/// A scored submission together with the report-type tag that selects the
/// interpretation path when the report is read back.
#[derive(Debug, Clone)]
pub struct ScoredSubmission {
    pub report_type: String,
    pub score: ScoreResult,
}

/// Scores a submission by dispatching on the quiz identifier.
///
/// * `bfi-10`: reversal-aware trait averaging.
/// * `mas-12`: subscale averaging.
/// * any other quiz whose questions carry an answer key: percent-correct,
///   tagged "standard".
/// * anything else: explicit not-implemented marker, tagged with the quiz
///   id itself.
pub fn score_submission(quiz: &Quiz, raw_answers: &HashMap<String, Value>) -> ScoredSubmission {
    match quiz.id.as_str() {
        BFI10_QUIZ_ID => {
            let numeric = collect_numeric_answers(&quiz.id, &quiz.questions, raw_answers);
            ScoredSubmission {
                report_type: BFI10_QUIZ_ID.to_string(),
                score: ScoreResult::Averages(score_bfi10(&quiz.questions, &numeric)),
            }
        }
        MAS12_QUIZ_ID => {
            let numeric = collect_numeric_answers(&quiz.id, &quiz.questions, raw_answers);
            ScoredSubmission {
                report_type: MAS12_QUIZ_ID.to_string(),
                score: ScoreResult::Averages(score_mas12(&quiz.questions, &numeric)),
            }
        }
        _ if quiz.questions.iter().any(|q| q.answer.is_some()) => ScoredSubmission {
            report_type: STANDARD_REPORT_TYPE.to_string(),
            score: ScoreResult::Text(score_percent_correct(&quiz.questions, raw_answers)),
        },
        _ => {
            tracing::warn!(
                "Quiz {} has no scoring strategy, storing placeholder score",
                quiz.id
            );
            ScoredSubmission {
                report_type: quiz.id.clone(),
                score: ScoreResult::Text(SCORING_NOT_IMPLEMENTED.to_string()),
            }
        }
    }
}

/// Reversal-aware trait averaging for the BFI-10.
///
/// The first character of a question's scoring key selects the trait
/// bucket; a `_R` suffix reverses the 1-5 response as `6 - v` (1 and 5
/// swap, 3 stays put). Traits with no contributing items stay `None`.
pub fn score_bfi10(
    questions: &[Question],
    answers: &HashMap<String, f64>,
) -> BTreeMap<String, Option<f64>> {
    let mut buckets: HashMap<char, Vec<f64>> = BFI10_TRAITS
        .iter()
        .map(|(code, _)| (*code, Vec::new()))
        .collect();

    for question in questions {
        let q_id = question.id.to_string();

        let Some(key) = question.key.as_deref() else {
            tracing::warn!("BFI-10 QID {}: question has no scoring key", q_id);
            continue;
        };
        // Skips were already logged by the normalizer.
        let Some(&value) = answers.get(&q_id) else {
            continue;
        };
        let Some(trait_code) = key.chars().next() else {
            tracing::warn!("BFI-10 QID {}: empty scoring key", q_id);
            continue;
        };
        let Some(bucket) = buckets.get_mut(&trait_code) else {
            tracing::warn!(
                "BFI-10 QID {}: unknown trait '{}' in key '{}'",
                q_id,
                trait_code,
                key
            );
            continue;
        };

        let contribution = if key.ends_with(REVERSAL_SUFFIX) {
            6.0 - value
        } else {
            value
        };
        bucket.push(contribution);
    }

    let mut final_scores = BTreeMap::new();
    for (code, name) in BFI10_TRAITS {
        let items = &buckets[&code];
        if items.is_empty() {
            tracing::warn!("BFI-10: no valid scores for trait {}", name);
        }
        final_scores.insert(name.to_string(), mean_rounded(items));
    }
    final_scores
}

/// Subscale averaging for the MAS-12. No reversal logic; a question's
/// scoring key selects its bucket directly.
pub fn score_mas12(
    questions: &[Question],
    answers: &HashMap<String, f64>,
) -> BTreeMap<String, Option<f64>> {
    let mut buckets: HashMap<&str, Vec<f64>> = MAS12_SUBSCALES
        .iter()
        .map(|(code, _)| (*code, Vec::new()))
        .collect();

    for question in questions {
        let q_id = question.id.to_string();

        let Some(key) = question.key.as_deref() else {
            tracing::warn!("MAS-12 QID {}: question has no scoring key", q_id);
            continue;
        };
        let Some(&value) = answers.get(&q_id) else {
            continue;
        };
        let Some(bucket) = buckets.get_mut(key) else {
            tracing::warn!("MAS-12 QID {}: unknown subscale key '{}'", q_id, key);
            continue;
        };
        bucket.push(value);
    }

    let mut final_scores = BTreeMap::new();
    for (code, name) in MAS12_SUBSCALES {
        let items = &buckets[code];
        if items.is_empty() {
            tracing::warn!("MAS-12: no valid scores for subscale {}", name);
        }
        final_scores.insert(name.to_string(), mean_rounded(items));
    }
    final_scores
}

/// Percent-correct scoring for quizzes with canonical answers.
///
/// Returns a whole-number percentage string such as "60%", or "0%" for a
/// quiz with no questions. Unanswered questions count as incorrect.
pub fn score_percent_correct(questions: &[Question], raw_answers: &HashMap<String, Value>) -> String {
    if questions.is_empty() {
        return "0%".to_string();
    }

    let mut correct = 0usize;
    for question in questions {
        let q_id = question.id.to_string();
        let (Some(expected), Some(submitted)) = (question.answer.as_ref(), raw_answers.get(&q_id))
        else {
            continue;
        };
        if answers_match(submitted, expected) {
            correct += 1;
        }
    }

    let percentage = (correct as f64 / questions.len() as f64) * 100.0;
    format!("{}%", percentage.round() as i64)
}

/// Submitted values arrive JSON round-tripped, so `8`, `"8"` and `8.0` must
/// compare equal. Both sides are normalized to a number first; only when
/// either side is non-numeric does comparison fall back to trimmed text.
fn answers_match(submitted: &Value, expected: &Value) -> bool {
    match (numeric_repr(submitted), numeric_repr(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => canonical_text(submitted) == canonical_text(expected),
    }
}

fn numeric_repr(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Arithmetic mean rounded to 2 decimal places; `None` for an empty slice
/// so an unscored category stays distinguishable from a zero score.
fn mean_rounded(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
