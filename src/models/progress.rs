// src/models/progress.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'user_progress' table in the database.
/// One row per submitted answer; rows are never updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct ProgressRecord {
    pub id: i64,
    pub user_id: String,
    pub question_id: i64,
    pub is_correct: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Insert payload for 'user_progress', also the body of `POST /submit`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    /// Opaque, caller-supplied identifier.
    pub user_id: String,
    pub question_id: i64,
    pub is_correct: bool,
}

/// A progress row joined with its question's placement.
/// Both placement fields are `None` when the question no longer exists.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProgressEntry {
    pub question_id: i64,
    pub is_correct: bool,
    pub topic_id: Option<i64>,
    pub subtopic_id: Option<i64>,
}

/// Aggregated correctness counts returned by `/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub correct: i64,
    pub wrong: i64,
}

/// Acknowledgment returned by `/submit`.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: String,
}

impl SubmitResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
