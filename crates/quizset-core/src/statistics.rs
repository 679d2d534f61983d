//! Aggregates derived from ledger histories.
//!
//! Nothing here is stored; every figure is recomputed from the append-only
//! histories on demand.

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Figures for a single (user, question) history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryStats {
    pub attempts: usize,
    pub total: u32,
    pub mean: f64,
    pub best: u8,
    pub latest: u8,
}

impl EntryStats {
    /// `None` for an empty history.
    pub fn from_history(points: &[u8]) -> Option<Self> {
        let latest = *points.last()?;
        let total: u32 = points.iter().map(|&p| u32::from(p)).sum();
        let best = points.iter().copied().max().unwrap_or(latest);
        Some(Self {
            attempts: points.len(),
            total,
            mean: f64::from(total) / points.len() as f64,
            best,
            latest,
        })
    }
}

/// Figures across every question one user has been scored on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub questions_attempted: usize,
    pub attempts: usize,
    pub total_points: u32,
    /// Mean over all attempts; 0.0 when there are none.
    pub mean_points: f64,
    /// Per-question figures, ascending by question id.
    pub per_question: Vec<(QuestionId, EntryStats)>,
}

impl UserSummary {
    pub fn from_histories(user_id: &str, histories: &[(QuestionId, Vec<u8>)]) -> Self {
        let mut per_question: Vec<(QuestionId, EntryStats)> = histories
            .iter()
            .filter_map(|(id, points)| EntryStats::from_history(points).map(|s| (*id, s)))
            .collect();
        per_question.sort_by_key(|(id, _)| *id);

        let attempts: usize = per_question.iter().map(|(_, s)| s.attempts).sum();
        let total_points: u32 = per_question.iter().map(|(_, s)| s.total).sum();
        let mean_points = if attempts == 0 {
            0.0
        } else {
            f64::from(total_points) / attempts as f64
        };

        Self {
            user_id: user_id.to_string(),
            questions_attempted: per_question.len(),
            attempts,
            total_points,
            mean_points,
            per_question,
        }
    }
}
