// src/models/topic.rs

use serde::Serialize;
use sqlx::prelude::FromRow;

/// Represents the 'topics' table. Seeded externally, read-only here.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Topic {
    pub id: i64,

    pub name: String,

    /// Optional emoji or icon name shown next to the topic.
    pub icon: Option<String>,
}

/// Represents the 'subtopics' table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Subtopic {
    pub id: i64,

    /// Owning topic.
    pub topic_id: i64,

    pub name: String,
}
