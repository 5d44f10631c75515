// src/models/question.rs

use serde::{Deserialize, Deserializer, Serialize, de};
use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Question {
    pub id: i64,

    pub topic_id: i64,

    pub subtopic_id: Option<i64>,

    /// The text content of the question.
    pub question_text: String,

    /// Always four options once persisted by the importer.
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// 0-based index into `options`.
    pub correct_option: i32,

    /// Explanation of the correct answer.
    pub explanation: Option<String>,

    /// Short test-taking tip.
    pub trick_tip: Option<String>,
}

/// Insert payload for the 'questions' table. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub topic_id: i64,
    pub subtopic_id: Option<i64>,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub explanation: Option<String>,
    pub trick_tip: Option<String>,
}

impl NewQuestion {
    /// Materializes the row the store would return after inserting this payload.
    pub fn into_question(self, id: i64) -> Question {
        Question {
            id,
            topic_id: self.topic_id,
            subtopic_id: self.subtopic_id,
            question_text: self.question_text,
            options: Json(self.options),
            correct_option: self.correct_option,
            explanation: self.explanation,
            trick_tip: self.trick_tip,
        }
    }
}

/// Which questions a listing or a stats query is restricted to.
///
/// A subtopic filter takes precedence over a topic filter when both are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFilter {
    All,
    Topic(i64),
    Subtopic(i64),
}

impl QuestionFilter {
    pub fn from_params(topic_id: Option<i64>, subtopic_id: Option<i64>) -> Self {
        match (subtopic_id, topic_id) {
            (Some(subtopic_id), _) => QuestionFilter::Subtopic(subtopic_id),
            (None, Some(topic_id)) => QuestionFilter::Topic(topic_id),
            (None, None) => QuestionFilter::All,
        }
    }

    /// Checks a question's placement against the filter.
    /// `topic_id` is `None` when the question itself could not be resolved.
    pub fn matches(&self, topic_id: Option<i64>, subtopic_id: Option<i64>) -> bool {
        match self {
            QuestionFilter::All => true,
            QuestionFilter::Topic(wanted) => topic_id == Some(*wanted),
            QuestionFilter::Subtopic(wanted) => subtopic_id == Some(*wanted),
        }
    }
}

/// Query parameters shared by `/questions` and `/stats`.
///
/// Empty filter values (`?topic_id=&subtopic_id=`) count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionQuery {
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub topic_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub subtopic_id: Option<i64>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid id {:?}: {}", raw, e))),
        _ => Ok(None),
    }
}

impl QuestionQuery {
    pub fn filter(&self) -> QuestionFilter {
        QuestionFilter::from_params(self.topic_id, self.subtopic_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    fn parse_query(uri: &str) -> Result<QuestionQuery, String> {
        let uri: Uri = uri.parse().unwrap();
        Query::<QuestionQuery>::try_from_uri(&uri)
            .map(|Query(params)| params)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn empty_filters_are_absent() {
        let params = parse_query("/questions?user_id=u&topic_id=&subtopic_id=").unwrap();

        assert_eq!(params.user_id.as_deref(), Some("u"));
        assert_eq!(params.filter(), QuestionFilter::All);
    }

    #[test]
    fn filled_filters_are_parsed() {
        let params = parse_query("/stats?user_id=u&topic_id=2&subtopic_id=").unwrap();
        assert_eq!(params.filter(), QuestionFilter::Topic(2));

        let params = parse_query("/stats?user_id=u").unwrap();
        assert_eq!(params.filter(), QuestionFilter::All);
    }

    #[test]
    fn non_numeric_filter_is_rejected() {
        assert!(parse_query("/questions?user_id=u&topic_id=abc").is_err());
    }

    #[test]
    fn subtopic_wins_over_topic() {
        assert_eq!(
            QuestionFilter::from_params(Some(1), Some(7)),
            QuestionFilter::Subtopic(7)
        );
        assert_eq!(
            QuestionFilter::from_params(Some(1), None),
            QuestionFilter::Topic(1)
        );
        assert_eq!(QuestionFilter::from_params(None, None), QuestionFilter::All);
    }

    #[test]
    fn unresolved_question_only_matches_unfiltered() {
        assert!(QuestionFilter::All.matches(None, None));
        assert!(!QuestionFilter::Topic(1).matches(None, None));
        assert!(!QuestionFilter::Subtopic(3).matches(None, None));
    }

    #[test]
    fn subtopic_filter_ignores_topic() {
        let filter = QuestionFilter::Subtopic(3);
        assert!(filter.matches(Some(9), Some(3)));
        assert!(!filter.matches(Some(1), Some(4)));
    }
}
