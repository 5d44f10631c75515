// src/store/mod.rs

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        progress::{ProgressEntry, SubmitAnswerRequest},
        question::{NewQuestion, Question, QuestionFilter},
        topic::{Subtopic, Topic},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

type Result<T> = std::result::Result<T, AppError>;

/// The relational store holding topics, questions and user progress.
///
/// Every method maps to a single select or insert. Nothing is cached,
/// retried or wrapped in a transaction.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// All topics, ordered by id ascending.
    async fn list_topics(&self) -> Result<Vec<Topic>>;

    /// Subtopics owned by `topic_id`, ordered by id.
    async fn list_subtopics(&self, topic_id: i64) -> Result<Vec<Subtopic>>;

    /// Questions matching `filter`, ordered by id.
    async fn list_questions(&self, filter: QuestionFilter) -> Result<Vec<Question>>;

    /// Ids of questions the user has answered correctly at least once.
    async fn correct_question_ids(&self, user_id: &str) -> Result<HashSet<i64>>;

    /// Every progress row of the user, joined with its question's topic/subtopic.
    async fn progress_entries(&self, user_id: &str) -> Result<Vec<ProgressEntry>>;

    /// Appends one progress row. No deduplication.
    async fn insert_progress(&self, record: &SubmitAnswerRequest) -> Result<()>;

    /// Inserts one question and returns its new id.
    async fn insert_question(&self, question: &NewQuestion) -> Result<i64>;
}

pub type SharedStore = Arc<dyn QuizStore>;
