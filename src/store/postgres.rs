// src/store/postgres.rs

use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions, types::Json};

use super::{QuizStore, Result};
use crate::models::{
    progress::{ProgressEntry, SubmitAnswerRequest},
    question::{NewQuestion, Question, QuestionFilter},
    topic::{Subtopic, Topic},
};

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_BACKOFF: Duration = Duration::from_secs(2);

/// Opens the connection pool, retrying while the database is still starting up.
pub async fn connect(database_url: &str) -> std::result::Result<PgPool, sqlx::Error> {
    let mut retry_count = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count >= CONNECT_ATTEMPTS {
                    return Err(e);
                }
                tracing::warn!(
                    "Database not ready, retrying in {}s... (Attempt {})",
                    CONNECT_BACKOFF.as_secs(),
                    retry_count
                );
                tokio::time::sleep(CONNECT_BACKOFF).await;
            }
        }
    }
}

/// `QuizStore` backed by the managed Postgres database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>("SELECT id, name, icon FROM topics ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch topics: {:?}", e);
                e
            })?;

        Ok(topics)
    }

    async fn list_subtopics(&self, topic_id: i64) -> Result<Vec<Subtopic>> {
        let subtopics = sqlx::query_as::<_, Subtopic>(
            r#"
            SELECT id, topic_id, name
            FROM subtopics
            WHERE topic_id = $1
            ORDER BY id
            "#,
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch subtopics of topic {}: {:?}", topic_id, e);
            e
        })?;

        Ok(subtopics)
    }

    async fn list_questions(&self, filter: QuestionFilter) -> Result<Vec<Question>> {
        let mut query_builder = QueryBuilder::<Postgres>::new(
            "SELECT
                id,
                topic_id,
                subtopic_id,
                question_text,
                options,
                correct_option,
                explanation,
                trick_tip
            FROM questions",
        );

        match filter {
            QuestionFilter::All => {}
            QuestionFilter::Topic(topic_id) => {
                query_builder.push(" WHERE topic_id = ").push_bind(topic_id);
            }
            QuestionFilter::Subtopic(subtopic_id) => {
                query_builder
                    .push(" WHERE subtopic_id = ")
                    .push_bind(subtopic_id);
            }
        }
        query_builder.push(" ORDER BY id");

        let questions: Vec<Question> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch questions ({:?}): {:?}", filter, e);
                e
            })?;

        Ok(questions)
    }

    async fn correct_question_ids(&self, user_id: &str) -> Result<HashSet<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT question_id
            FROM user_progress
            WHERE user_id = $1 AND is_correct = TRUE
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn progress_entries(&self, user_id: &str) -> Result<Vec<ProgressEntry>> {
        // LEFT JOIN: rows pointing at a vanished question still count when unfiltered.
        let entries = sqlx::query_as::<_, ProgressEntry>(
            r#"
            SELECT
                p.question_id,
                p.is_correct,
                q.topic_id,
                q.subtopic_id
            FROM user_progress p
            LEFT JOIN questions q ON q.id = p.question_id
            WHERE p.user_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn insert_progress(&self, record: &SubmitAnswerRequest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_progress (user_id, question_id, is_correct)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.user_id)
        .bind(record.question_id)
        .bind(record.is_correct)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert progress record: {:?}", e);
            e
        })?;

        Ok(())
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO questions
                (topic_id, subtopic_id, question_text, options, correct_option, explanation, trick_tip)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(question.topic_id)
        .bind(question.subtopic_id)
        .bind(&question.question_text)
        .bind(Json(&question.options))
        .bind(question.correct_option)
        .bind(&question.explanation)
        .bind(&question.trick_tip)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
