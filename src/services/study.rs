// src/services/study.rs

use std::collections::HashSet;

use crate::{
    error::AppError,
    models::{
        progress::{ProgressEntry, Stats, SubmitAnswerRequest},
        question::{Question, QuestionFilter},
        topic::{Subtopic, Topic},
    },
    store::QuizStore,
};

pub async fn list_topics(store: &dyn QuizStore) -> Result<Vec<Topic>, AppError> {
    store.list_topics().await
}

pub async fn list_subtopics(store: &dyn QuizStore, topic_id: i64) -> Result<Vec<Subtopic>, AppError> {
    store.list_subtopics(topic_id).await
}

/// Questions matching `filter` that the user has not yet answered correctly.
///
/// A question answered wrongly stays eligible; one correct answer removes it
/// from every later session.
pub async fn list_available_questions(
    store: &dyn QuizStore,
    user_id: &str,
    filter: QuestionFilter,
) -> Result<Vec<Question>, AppError> {
    let questions = store.list_questions(filter).await?;
    let mastered = store.correct_question_ids(user_id).await?;

    let available = exclude_mastered(questions, &mastered);
    tracing::debug!(
        "User {} has {} available questions ({:?}, {} mastered)",
        user_id,
        available.len(),
        filter,
        mastered.len()
    );

    Ok(available)
}

/// Counts the user's correct and wrong submissions within `filter`.
pub async fn get_stats(
    store: &dyn QuizStore,
    user_id: &str,
    filter: QuestionFilter,
) -> Result<Stats, AppError> {
    let entries = store.progress_entries(user_id).await?;
    Ok(tally(&entries, filter))
}

/// Records one answer. Repeated submissions of the same question each add a row.
pub async fn submit_answer(store: &dyn QuizStore, submission: &SubmitAnswerRequest) -> Result<(), AppError> {
    store.insert_progress(submission).await?;
    tracing::info!(
        "Recorded answer: user={} question={} correct={}",
        submission.user_id,
        submission.question_id,
        submission.is_correct
    );
    Ok(())
}

fn exclude_mastered(questions: Vec<Question>, mastered: &HashSet<i64>) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| !mastered.contains(&q.id))
        .collect()
}

fn tally(entries: &[ProgressEntry], filter: QuestionFilter) -> Stats {
    entries
        .iter()
        .filter(|e| filter.matches(e.topic_id, e.subtopic_id))
        .fold(Stats::default(), |mut stats, e| {
            if e.is_correct {
                stats.correct += 1;
            } else {
                stats.wrong += 1;
            }
            stats
        })
}
