// src/scoring/mod.rs

pub mod answers;
pub mod charts;
pub mod engine;
pub mod interpret;

pub use answers::collect_numeric_answers;
pub use engine::{ScoreResult, ScoredSubmission, score_submission};
