//! Append-only score ledger.
//!
//! One history per (user, question) pair, oldest value first. Values are only
//! ever appended; nothing is reordered, overwritten, or truncated.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{QuestionId, ScoreKey};
use crate::statistics::{EntryStats, UserSummary};
use crate::traits::ScoreStore;

/// Highest points value a single attempt can score.
pub const MAX_POINTS: i64 = 5;

/// A ledger entry as it stands after an append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub key: ScoreKey,
    /// Points in append order.
    pub points: Vec<u8>,
}

impl ScoreEntry {
    pub fn latest(&self) -> Option<u8> {
        self.points.last().copied()
    }

    pub fn attempts(&self) -> usize {
        self.points.len()
    }
}

/// Points history keyed by user and question, persisted through a [`ScoreStore`].
///
/// Appends are serialized so concurrent callers cannot lose each other's
/// writes between the load and the save.
pub struct ScoreLedger<S: ScoreStore> {
    store: S,
    append_lock: Mutex<()>,
}

impl<S: ScoreStore> ScoreLedger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            append_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append `points` to the history of `(user_id, question_id)`, creating
    /// the entry on first use.
    ///
    /// The new value is persisted before the call returns; if the store fails
    /// the error is returned and no success is reported.
    pub fn append_points(
        &self,
        user_id: &str,
        question_id: QuestionId,
        points: i64,
    ) -> Result<ScoreEntry, QuizError> {
        if !(0..=MAX_POINTS).contains(&points) {
            return Err(QuizError::InvalidPoints(points));
        }
        let key = validate_key(user_id, question_id)?;

        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| QuizError::StorageFailure(anyhow::anyhow!("ledger lock poisoned")))?;

        let mut history = self
            .store
            .load(&key)
            .map_err(QuizError::StorageFailure)?
            .unwrap_or_default();
        history.push(points as u8);
        self.store
            .save(&key, &history)
            .map_err(QuizError::StorageFailure)?;

        tracing::info!(%key, points, attempts = history.len(), "points appended");
        Ok(ScoreEntry {
            key,
            points: history,
        })
    }

    /// Full history in append order; empty if nothing was recorded yet.
    pub fn history(&self, user_id: &str, question_id: QuestionId) -> Result<Vec<u8>, QuizError> {
        let key = validate_key(user_id, question_id)?;
        let history = self
            .store
            .load(&key)
            .map_err(QuizError::StorageFailure)?
            .unwrap_or_default();
        Ok(history)
    }

    /// Most recent value, or `None` if the history is empty.
    pub fn latest(&self, user_id: &str, question_id: QuestionId) -> Result<Option<u8>, QuizError> {
        Ok(self.history(user_id, question_id)?.last().copied())
    }

    pub fn entry_stats(
        &self,
        user_id: &str,
        question_id: QuestionId,
    ) -> Result<Option<EntryStats>, QuizError> {
        Ok(EntryStats::from_history(&self.history(user_id, question_id)?))
    }

    /// Aggregate every entry recorded for `user_id`.
    pub fn summary(&self, user_id: &str) -> Result<UserSummary, QuizError> {
        let user_id = normalize_user(user_id)?;
        let keys = self.store.keys().map_err(QuizError::StorageFailure)?;
        let mut histories = Vec::new();
        for key in keys.into_iter().filter(|k| k.user_id == user_id) {
            let history = self
                .store
                .load(&key)
                .map_err(QuizError::StorageFailure)?
                .unwrap_or_default();
            histories.push((key.question_id, history));
        }
        Ok(UserSummary::from_histories(user_id, &histories))
    }
}

/// Surrounding whitespace is not part of a user id.
fn normalize_user(user_id: &str) -> Result<&str, QuizError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(QuizError::MissingKey("user_id"));
    }
    Ok(user_id)
}

fn validate_key(user_id: &str, question_id: QuestionId) -> Result<ScoreKey, QuizError> {
    let user_id = normalize_user(user_id)?;
    if question_id.is_unset() {
        return Err(QuizError::MissingKey("question_id"));
    }
    Ok(ScoreKey::new(user_id, question_id))
}
