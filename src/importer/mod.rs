// src/importer/mod.rs

//! One-shot import of quiz questions from an HTML exam dump.
//!
//! The document is flattened to text lines, scanned by the line state machine
//! in [`extract`], filtered and normalized by [`prepare`], then inserted one
//! question at a time. A failed insert is logged and skipped.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::{store::QuizStore, utils::html};

pub mod extract;
pub mod prepare;

pub use extract::{Candidate, extract_candidates};
pub use prepare::{ImportDefaults, prepare};

/// File read by the `import_questions` binary, relative to the working directory.
pub const DEFAULT_INPUT_FILE: &str = "aa_660_final2.html";

const PROGRESS_EVERY: usize = 50;

#[derive(Debug)]
pub enum ImportError {
    MissingFile(PathBuf),
    Read(PathBuf, io::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::MissingFile(path) => write!(f, "input file {} not found", path.display()),
            ImportError::Read(path, e) => write!(f, "failed to read {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for ImportError {}

/// Outcome of one import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Candidates recovered from the text, valid or not.
    pub found: usize,
    pub imported: usize,
    /// Candidates dropped by the filter (no text or fewer than two options).
    pub skipped: usize,
    /// Candidates the store refused.
    pub failed: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} candidates found, {} imported, {} skipped, {} failed",
            self.found, self.imported, self.skipped, self.failed
        )
    }
}

/// Reads the input document. Any non-UTF-8 bytes are replaced rather than rejected.
pub fn read_document(path: &Path) -> Result<String, ImportError> {
    if !path.exists() {
        return Err(ImportError::MissingFile(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|e| ImportError::Read(path.to_path_buf(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extracts candidates from `document` and inserts every valid one into `store`.
pub async fn import_document(
    store: &dyn QuizStore,
    document: &str,
    defaults: &ImportDefaults,
) -> ImportReport {
    let lines = html::extract_lines(document);
    let candidates = extract_candidates(&lines);
    tracing::info!(
        "Found {} possible questions in {} lines",
        candidates.len(),
        lines.len()
    );

    let mut report = ImportReport {
        found: candidates.len(),
        ..ImportReport::default()
    };

    for (ordinal, candidate) in candidates.iter().enumerate() {
        let Some(question) = prepare(candidate, defaults) else {
            tracing::debug!(
                "Skipping question {} (#{}): {} options",
                candidate.number,
                ordinal + 1,
                candidate.options.len()
            );
            report.skipped += 1;
            continue;
        };

        match store.insert_question(&question).await {
            Ok(id) => {
                report.imported += 1;
                tracing::debug!("Imported question {} as id {}", candidate.number, id);
                if report.imported % PROGRESS_EVERY == 0 {
                    tracing::info!("Imported {} questions...", report.imported);
                }
            }
            Err(e) => {
                report.failed += 1;
                tracing::error!(
                    "Failed to insert question {} (#{}): {}",
                    candidate.number,
                    ordinal + 1,
                    e
                );
            }
        }
    }

    report
}
