// src/importer/prepare.rs

use super::extract::Candidate;
use crate::models::question::NewQuestion;

pub const OPTION_COUNT: usize = 4;
pub const PLACEHOLDER_OPTION: &str = "-";
pub const MAX_QUESTION_CHARS: usize = 500;
pub const MIN_OPTIONS: usize = 2;

/// Fields the source documents never carry, attached to every imported question.
#[derive(Debug, Clone)]
pub struct ImportDefaults {
    pub topic_id: i64,
    pub explanation: String,
    pub trick_tip: String,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            // 1 = "Legislação"; imported questions are re-filed by hand afterwards.
            topic_id: 1,
            explanation: "Resposta baseada no gabarito oficial.".to_string(),
            trick_tip: "Leia com atenção o enunciado.".to_string(),
        }
    }
}

/// Turns a candidate into an insertable question, or `None` if it has no text
/// or fewer than two options.
///
/// Options are padded with `"-"` and cut to four; text is cut to 500 characters.
/// `correct_option` is taken as-is, even when it was never marked, unless the
/// marked option was cut off, in which case it falls back to 0.
pub fn prepare(candidate: &Candidate, defaults: &ImportDefaults) -> Option<NewQuestion> {
    if candidate.text.is_empty() || candidate.options.len() < MIN_OPTIONS {
        return None;
    }

    let mut options = candidate.options.clone();
    options.resize(OPTION_COUNT.max(options.len()), PLACEHOLDER_OPTION.to_string());
    options.truncate(OPTION_COUNT);

    let correct_option = if candidate.correct_index < OPTION_COUNT {
        candidate.correct_index as i32
    } else {
        0
    };

    Some(NewQuestion {
        topic_id: defaults.topic_id,
        subtopic_id: None,
        question_text: candidate.text.chars().take(MAX_QUESTION_CHARS).collect(),
        options,
        correct_option,
        explanation: Some(defaults.explanation.clone()),
        trick_tip: Some(defaults.trick_tip.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, options: &[&str], correct_index: usize) -> Candidate {
        Candidate {
            number: "1".into(),
            text: text.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
        }
    }

    #[test]
    fn short_option_lists_are_padded() {
        let question = prepare(
            &candidate("What is the capital?", &["Paris", "Lyon"], 0),
            &ImportDefaults::default(),
        )
        .unwrap();

        assert_eq!(question.question_text, "What is the capital?");
        assert_eq!(question.options, vec!["Paris", "Lyon", "-", "-"]);
        assert_eq!(question.correct_option, 0);
        assert_eq!(question.topic_id, 1);
        assert_eq!(question.subtopic_id, None);
        assert_eq!(
            question.explanation.as_deref(),
            Some("Resposta baseada no gabarito oficial.")
        );
    }

    #[test]
    fn only_the_first_four_options_survive() {
        let question = prepare(
            &candidate("Q", &["a", "b", "c", "d", "e", "f"], 3),
            &ImportDefaults::default(),
        )
        .unwrap();

        assert_eq!(question.options, vec!["a", "b", "c", "d"]);
        assert_eq!(question.correct_option, 3);
    }

    #[test]
    fn single_option_or_empty_text_is_rejected() {
        let defaults = ImportDefaults::default();
        assert!(prepare(&candidate("Q", &["só uma"], 0), &defaults).is_none());
        assert!(prepare(&candidate("", &["a", "b"], 0), &defaults).is_none());
    }

    #[test]
    fn long_text_is_cut_on_char_boundaries() {
        let text = "ç".repeat(MAX_QUESTION_CHARS + 20);
        let question = prepare(&candidate(&text, &["a", "b"], 1), &ImportDefaults::default())
            .unwrap();

        assert_eq!(question.question_text.chars().count(), MAX_QUESTION_CHARS);
    }

    #[test]
    fn marker_on_a_dropped_option_falls_back_to_first() {
        let question = prepare(
            &candidate("Q", &["a", "b", "c", "d", "e"], 4),
            &ImportDefaults::default(),
        )
        .unwrap();

        assert_eq!(question.correct_option, 0);
    }
}
