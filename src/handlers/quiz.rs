// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        progress::{SubmitAnswerRequest, SubmitResponse},
        question::QuestionQuery,
    },
    services::study,
    store::SharedStore,
};

/// Returns the questions the user has not yet answered correctly.
///
/// Filtered by `subtopic_id` if present, else by `topic_id`.
/// Options and `correct_option` are returned as stored; the client decides when to reveal them.
pub async fn list_questions(
    State(store): State<SharedStore>,
    params: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let user_id = require_user_id(&params)?;

    let questions = study::list_available_questions(store.as_ref(), user_id, params.filter()).await?;

    Ok(Json(questions))
}

/// Returns `{correct, wrong}` for the user, with the same filter precedence as `/questions`.
pub async fn get_stats(
    State(store): State<SharedStore>,
    params: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let user_id = require_user_id(&params)?;

    let stats = study::get_stats(store.as_ref(), user_id, params.filter()).await?;

    Ok(Json(stats))
}

/// Records one answer attempt.
///
/// * No existence check on `question_id`.
/// * No deduplication: every call inserts a new row.
pub async fn submit_answer(
    State(store): State<SharedStore>,
    req: Result<Json<SubmitAnswerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = req?;
    study::submit_answer(store.as_ref(), &req).await?;

    Ok(Json(SubmitResponse::success()))
}

fn require_user_id(params: &QuestionQuery) -> Result<&str, AppError> {
    params
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("user_id is required".to_string()))
}
