//! Collaborator traits the core is written against.
//!
//! The question bank and the score store live outside the selection and
//! ledger logic; `bank` and `store` provide the in-tree implementations.

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{Category, Difficulty, Question, QuestionId, ScoreKey};

// ---------------------------------------------------------------------------
// Question repository
// ---------------------------------------------------------------------------

/// Read-only query interface over a question bank.
pub trait QuestionRepository: Send + Sync {
    /// Questions of one category and tier, minus the ids in `exclude`.
    ///
    /// Implementations keep no per-call state and return questions in
    /// ascending id order, so a seeded selection is reproducible.
    fn questions_of(
        &self,
        category: Category,
        difficulty: Difficulty,
        exclude: &HashSet<QuestionId>,
    ) -> Vec<Arc<Question>>;
}

// ---------------------------------------------------------------------------
// Score store
// ---------------------------------------------------------------------------

/// Durable storage for ledger histories.
///
/// The ledger decides what a history must contain; a store only reads and
/// writes whole sequences.
pub trait ScoreStore: Send + Sync {
    /// Load the history for `key`, or `None` if nothing was ever saved.
    fn load(&self, key: &ScoreKey) -> anyhow::Result<Option<Vec<u8>>>;

    /// Replace the stored history for `key`.
    fn save(&self, key: &ScoreKey, points: &[u8]) -> anyhow::Result<()>;

    /// Every key with a stored history.
    fn keys(&self) -> anyhow::Result<Vec<ScoreKey>>;
}
