// src/quizzes.rs

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::models::quiz::Quiz;

/// On-disk quiz file shape: one file carries one or more definitions under
/// a "quizzes" array.
#[derive(Debug, Deserialize)]
struct QuizFile {
    quizzes: Vec<Quiz>,
}

/// Immutable set of quiz definitions, loaded once at startup and shared
/// through application state.
#[derive(Debug, Clone, Default)]
pub struct QuizCatalog {
    quizzes: Vec<Quiz>,
}

impl QuizCatalog {
    /// Loads every `.json` file in `dir`, in file-name order. Files that
    /// cannot be read or parsed are logged and skipped; an empty catalog
    /// is not an error.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut quizzes = Vec::new();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Quiz directory {:?} not readable: {}", dir, e);
                return Self::default();
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str::<QuizFile>(&contents) {
                    Ok(file) => {
                        tracing::debug!("Loaded {} quiz(zes) from {:?}", file.quizzes.len(), path);
                        quizzes.extend(file.quizzes);
                    }
                    Err(e) => tracing::error!("Error decoding {:?}: {}", path, e),
                },
                Err(e) => tracing::error!("Quiz data file {:?} not readable: {}", path, e),
            }
        }

        if quizzes.is_empty() {
            tracing::warn!("No quiz definitions loaded from {:?}", dir);
        }

        Self { quizzes }
    }

    pub fn all(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn find(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }
}
