// src/importer/extract.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::html::clean_text;

/// "1) text", "01. text", "1 - text", "1— text"
static QUESTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s?[).—-]\s*(.+)").expect("valid question regex"));
/// "a) text", "B. text", "c - text"
static OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([a-dA-D])\s?[).—-]\s*(.+)").expect("valid option regex"));
static CORRECT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\*|\(x\)").expect("valid marker regex"));
/// "Paris *", "Paris (x)", "Paris * (X)"
static TRAILING_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\s*(?:\*|\(x\)))+\s*$").expect("valid trailing marker regex")
});

/// A question/option group recovered from the text, before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Number as written in the source ("01", "3").
    pub number: String,
    pub text: String,
    /// Options in document order, trailing correctness markers removed.
    pub options: Vec<String>,
    /// Index of the last marked option; 0 when nothing was marked.
    pub correct_index: usize,
}

impl Candidate {
    fn open(number: &str, text: &str) -> Self {
        Self {
            number: number.to_string(),
            text: text.to_string(),
            options: Vec::new(),
            correct_index: 0,
        }
    }
}

/// Extractor state. The open candidate travels inside the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    NoCurrentQuestion,
    BuildingQuestionText(Candidate),
    BuildingOptions(Candidate),
}

/// What a single line did, besides moving to the next state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A previous candidate was closed by a new question start.
    Emit(Candidate),
    Discard,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    QuestionStart { number: &'a str, text: &'a str },
    Choice { text: &'a str, marked: bool },
    Other(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = QUESTION_START.captures(line) {
        let number = caps.get(1).map_or("", |m| m.as_str());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Line::QuestionStart { number, text };
    }
    if let Some(caps) = OPTION.captures(line) {
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Line::Choice {
            text,
            marked: CORRECT_MARKER.is_match(line),
        };
    }
    Line::Other(line)
}

/// Drops the marker run at the end of an option. Markers inside the text stay,
/// and an option made only of markers is kept as written.
fn strip_marker(option: &str) -> String {
    let stripped = clean_text(&TRAILING_MARKERS.replace(option, ""));
    if stripped.is_empty() {
        clean_text(option)
    } else {
        stripped
    }
}

/// Transition function over (state, line).
///
/// A question start always closes the open candidate. Option lines only count
/// while a question is open. Any other line extends the question text until
/// the first option arrives, and is dropped after that.
pub fn step(state: State, line: &str) -> (State, Effect) {
    match (state, classify(line)) {
        (state, Line::QuestionStart { number, text }) => {
            let effect = match state {
                State::NoCurrentQuestion => Effect::Continue,
                State::BuildingQuestionText(done) | State::BuildingOptions(done) => {
                    Effect::Emit(done)
                }
            };
            (
                State::BuildingQuestionText(Candidate::open(number, text)),
                effect,
            )
        }
        (
            State::BuildingQuestionText(mut current) | State::BuildingOptions(mut current),
            Line::Choice { text, marked },
        ) => {
            current.options.push(strip_marker(text));
            if marked {
                current.correct_index = current.options.len() - 1;
            }
            (State::BuildingOptions(current), Effect::Continue)
        }
        (State::BuildingQuestionText(mut current), Line::Other(extra)) => {
            current.text.push(' ');
            current.text.push_str(extra);
            (State::BuildingQuestionText(current), Effect::Continue)
        }
        (state, _) => (state, Effect::Discard),
    }
}

/// Runs the state machine over `lines` in order and returns every candidate,
/// including the one still open at the end of input.
pub fn extract_candidates<I, S>(lines: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = Vec::new();
    let mut state = State::NoCurrentQuestion;

    for line in lines {
        let line = line.as_ref();
        if line.is_empty() {
            continue;
        }
        let (next, effect) = step(state, line);
        match effect {
            Effect::Emit(candidate) => candidates.push(candidate),
            Effect::Discard => tracing::trace!("Discarded line: {}", line),
            Effect::Continue => {}
        }
        state = next;
    }

    match state {
        State::BuildingQuestionText(last) | State::BuildingOptions(last) => candidates.push(last),
        State::NoCurrentQuestion => {}
    }

    candidates
}
