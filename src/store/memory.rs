// src/store/memory.rs

use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use super::{QuizStore, Result};
use crate::{
    error::AppError,
    models::{
        progress::{ProgressEntry, ProgressRecord, SubmitAnswerRequest},
        question::{NewQuestion, Question, QuestionFilter},
        topic::{Subtopic, Topic},
    },
};

#[derive(Default)]
struct Tables {
    topics: Vec<Topic>,
    subtopics: Vec<Subtopic>,
    questions: Vec<Question>,
    progress: Vec<ProgressRecord>,
}

/// In-process `QuizStore` used as a test double in place of Postgres.
/// Ids are assigned sequentially, starting at 1, per table.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds topics and subtopics, which this system never writes itself.
    pub fn with_taxonomy(topics: Vec<Topic>, subtopics: Vec<Subtopic>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                topics,
                subtopics,
                ..Tables::default()
            }),
        }
    }

    pub fn questions(&self) -> Result<Vec<Question>> {
        Ok(self.lock()?.questions.clone())
    }

    pub fn progress(&self) -> Result<Vec<ProgressRecord>> {
        Ok(self.lock()?.progress.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|e| AppError::InternalServerError(format!("memory store poisoned: {}", e)))
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        let mut topics = self.lock()?.topics.clone();
        topics.sort_by_key(|t| t.id);
        Ok(topics)
    }

    async fn list_subtopics(&self, topic_id: i64) -> Result<Vec<Subtopic>> {
        let mut subtopics: Vec<Subtopic> = self
            .lock()?
            .subtopics
            .iter()
            .filter(|s| s.topic_id == topic_id)
            .cloned()
            .collect();
        subtopics.sort_by_key(|s| s.id);
        Ok(subtopics)
    }

    async fn list_questions(&self, filter: QuestionFilter) -> Result<Vec<Question>> {
        Ok(self
            .lock()?
            .questions
            .iter()
            .filter(|q| filter.matches(Some(q.topic_id), q.subtopic_id))
            .cloned()
            .collect())
    }

    async fn correct_question_ids(&self, user_id: &str) -> Result<HashSet<i64>> {
        Ok(self
            .lock()?
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && p.is_correct)
            .map(|p| p.question_id)
            .collect())
    }

    async fn progress_entries(&self, user_id: &str) -> Result<Vec<ProgressEntry>> {
        let tables = self.lock()?;
        let entries = tables
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| {
                let question = tables.questions.iter().find(|q| q.id == p.question_id);
                ProgressEntry {
                    question_id: p.question_id,
                    is_correct: p.is_correct,
                    topic_id: question.map(|q| q.topic_id),
                    subtopic_id: question.and_then(|q| q.subtopic_id),
                }
            })
            .collect();
        Ok(entries)
    }

    async fn insert_progress(&self, record: &SubmitAnswerRequest) -> Result<()> {
        let mut tables = self.lock()?;
        let id = tables.progress.len() as i64 + 1;
        tables.progress.push(ProgressRecord {
            id,
            user_id: record.user_id.clone(),
            question_id: record.question_id,
            is_correct: record.is_correct,
            created_at: Some(chrono::Utc::now()),
        });
        Ok(())
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64> {
        let mut tables = self.lock()?;
        let id = tables.questions.len() as i64 + 1;
        tables.questions.push(question.clone().into_question(id));
        Ok(id)
    }
}
