//! Core error types.
//!
//! Selection never fails for lack of questions, so every variant here comes
//! from configuration, ledger input validation, or the storage collaborator.

use thiserror::Error;

use crate::model::{Category, QuestionId};

/// Errors raised by the quizset core.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A category rule whose minimums cannot fit inside its budget.
    #[error("invalid rule{}: {reason}", .category.map(|c| format!(" for {c}")).unwrap_or_default())]
    ConfigurationError {
        category: Option<Category>,
        reason: String,
    },

    /// Points outside the accepted 0..=5 range.
    #[error("invalid points {0}: must be between 0 and 5")]
    InvalidPoints(i64),

    /// An empty user identifier or an unset question identifier.
    #[error("missing key: {0} is empty or unset")]
    MissingKey(&'static str),

    /// The score store failed to load or persist an entry.
    #[error("storage failure: {0:#}")]
    StorageFailure(#[source] anyhow::Error),

    /// Two bank entries share one identifier.
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),
}

impl QuizError {
    /// Attach `category` to a configuration error; other variants pass through.
    pub fn for_category(self, category: Category) -> Self {
        match self {
            QuizError::ConfigurationError { reason, .. } => QuizError::ConfigurationError {
                category: Some(category),
                reason,
            },
            other => other,
        }
    }

    /// Returns `true` if the caller may reasonably retry with corrected input
    /// (a re-prompt), as opposed to fixing configuration or storage.
    pub fn is_input_error(&self) -> bool {
        matches!(self, QuizError::InvalidPoints(_) | QuizError::MissingKey(_))
    }
}
