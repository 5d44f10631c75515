// src/handlers/topic.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, services::study, store::SharedStore};

/// Lists all topics ordered by id.
pub async fn list_topics(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let topics = study::list_topics(store.as_ref()).await?;

    Ok(Json(topics))
}

/// Lists the subtopics of one topic. An unknown topic yields an empty list.
pub async fn list_subtopics(
    State(store): State<SharedStore>,
    Path(topic_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let subtopics = study::list_subtopics(store.as_ref(), topic_id).await?;

    Ok(Json(subtopics))
}
