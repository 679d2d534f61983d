//! Game sessions.
//!
//! A session belongs to one player and plays one or more games. Each game
//! deals one question set per category and hands questions out in random
//! order, one category at a time. Session state lives in an explicit
//! [`SessionContext`] passed to whoever needs it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::config::RuleSet;
use crate::error::QuizError;
use crate::ledger::{ScoreEntry, ScoreLedger};
use crate::model::{Category, CategoryRule, Question, QuestionId, QuestionSet};
use crate::selection::select_with_rng;
use crate::traits::{QuestionRepository, ScoreStore};

/// Per-player session state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    pub games_played: u32,
    quit: bool,
}

impl SessionContext {
    pub fn new(user_id: &str) -> Result<Self, QuizError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(QuizError::MissingKey("user_id"));
        }
        let session = Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            started_at: Utc::now(),
            games_played: 0,
            quit: false,
        };
        tracing::info!(session = %session.id, user = %session.user_id, "session started");
        Ok(session)
    }

    /// Deal the next game for this session.
    pub fn deal_game<R, G>(&self, rules: &RuleSet, repository: &R, rng: &mut G) -> Game
    where
        R: QuestionRepository + ?Sized,
        G: Rng + ?Sized,
    {
        Game::deal(self.games_played + 1, rules, repository, rng)
    }

    /// Record points for the session's player.
    pub fn record<S: ScoreStore>(
        &self,
        ledger: &ScoreLedger<S>,
        question_id: QuestionId,
        points: i64,
    ) -> Result<ScoreEntry, QuizError> {
        ledger.append_points(&self.user_id, question_id, points)
    }

    pub fn finish_game(&mut self) {
        self.games_played += 1;
        tracing::info!(session = %self.id, games_played = self.games_played, "game finished");
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Whether another game should be dealt.
    pub fn wants_more(&self, games_per_session: u32) -> bool {
        !self.quit && self.games_played < games_per_session
    }
}

/// One game: a question set for every category, consumed as questions are asked.
#[derive(Debug, Clone)]
pub struct Game {
    pub number: u32,
    sets: Vec<QuestionSet>,
    current: usize,
}

impl Game {
    /// Select a set per category, in [`Category::ALL`] order. Categories
    /// without a rule get an empty set.
    pub fn deal<R, G>(number: u32, rules: &RuleSet, repository: &R, rng: &mut G) -> Self
    where
        R: QuestionRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let sets = Category::ALL
            .iter()
            .map(|&category| {
                let rule = rules
                    .get(&category)
                    .copied()
                    .unwrap_or_else(CategoryRule::zero);
                select_with_rng(category, &rule, repository, rng)
            })
            .collect();
        Self {
            number,
            sets,
            current: 0,
        }
    }

    pub fn sets(&self) -> &[QuestionSet] {
        &self.sets
    }

    /// Questions not yet asked.
    pub fn remaining(&self) -> usize {
        self.sets.iter().map(QuestionSet::len).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Take a random unasked question from the current category, moving to
    /// the next category once the current one is used up.
    pub fn next_question<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Option<(Category, Arc<Question>)> {
        while let Some(set) = self.sets.get_mut(self.current) {
            if set.is_empty() {
                self.current += 1;
                continue;
            }
            let category = set.category;
            let ids = set.ids();
            let id = ids[rng.gen_range(0..ids.len())];
            return set.remove(id).map(|q| (category, q));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;
    use crate::config::default_rules;
    use crate::model::Difficulty;
    use crate::store::MemoryScoreStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn full_bank() -> QuestionBank {
        let mut bank = QuestionBank::new();
        let mut id = 1;
        for category in Category::ALL {
            for difficulty in Difficulty::ALL {
                for _ in 0..4 {
                    bank.insert(Question {
                        id: QuestionId(id),
                        category,
                        difficulty,
                        text: format!("{category} {difficulty} #{id}"),
                        answer: None,
                        time_limits: vec![],
                    })
                    .unwrap();
                    id += 1;
                }
            }
        }
        bank
    }

    #[test]
    fn session_requires_user() {
        assert!(matches!(
            SessionContext::new("  "),
            Err(QuizError::MissingKey("user_id"))
        ));
        let session = SessionContext::new(" alice ").unwrap();
        assert_eq!(session.user_id, "alice");
        assert_eq!(session.games_played, 0);
    }

    #[test]
    fn game_asks_categories_in_order() {
        let bank = full_bank();
        let session = SessionContext::new("alice").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = session.deal_game(&default_rules(), &bank, &mut rng);
        assert_eq!(game.number, 1);
        assert_eq!(game.sets().len(), 3);

        let total = game.remaining();
        let mut asked = Vec::new();
        while let Some((category, q)) = game.next_question(&mut rng) {
            assert_eq!(q.category, category);
            asked.push(category);
        }
        assert_eq!(asked.len(), total);
        assert!(game.is_finished());

        let mut sorted = asked.clone();
        sorted.sort();
        assert_eq!(asked, sorted, "categories must not interleave");
    }

    #[test]
    fn unconfigured_category_is_skipped() {
        let bank = full_bank();
        let mut rules = default_rules();
        rules.remove(&Category::Theoretical);

        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::deal(1, &rules, &bank, &mut rng);
        assert!(game.sets()[1].is_empty());
        while let Some((category, _)) = game.next_question(&mut rng) {
            assert_ne!(category, Category::Theoretical);
        }
    }

    #[test]
    fn record_goes_to_the_ledger() {
        let ledger = ScoreLedger::new(MemoryScoreStore::new());
        let session = SessionContext::new("alice").unwrap();
        session.record(&ledger, QuestionId(42), 3).unwrap();
        let entry = session.record(&ledger, QuestionId(42), 5).unwrap();
        assert_eq!(entry.points, vec![3, 5]);
        assert!(session.record(&ledger, QuestionId(42), 9).is_err());
    }

    #[test]
    fn session_game_count_and_quit() {
        let mut session = SessionContext::new("bob").unwrap();
        assert!(session.wants_more(2));
        session.finish_game();
        assert!(session.wants_more(2));
        session.finish_game();
        assert!(!session.wants_more(2));

        let mut session = SessionContext::new("bob").unwrap();
        session.quit();
        assert!(session.has_quit());
        assert!(!session.wants_more(5));
    }
}
