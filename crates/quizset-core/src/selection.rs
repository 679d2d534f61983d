//! Difficulty-budgeted question selection.
//!
//! A selection happens in two phases:
//!
//! 1. For each tier, in ascending difficulty, draw the rule's minimum number
//!    of questions (capped at what the bank holds) uniformly without
//!    replacement, charging each against the budget.
//! 2. Pool every question left over from the three tiers and keep drawing
//!    uniformly from that shrinking pool while budget remains.
//!
//! Phase 2 checks the budget only before each draw, so the last question may
//! push consumed weight past the budget. That overshoot is intended: a set is
//! never left short of its budget while questions remain.
//!
//! Under-supplied tiers are not an error. The set simply contains what the
//! bank has, so `len() < rule.minimum_count()` is a valid outcome.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Category, CategoryRule, Difficulty, Question, QuestionId, QuestionSet};
use crate::traits::QuestionRepository;

/// Select a question set for `category` using the thread-local RNG.
pub fn select<R>(category: Category, rule: &CategoryRule, repository: &R) -> QuestionSet
where
    R: QuestionRepository + ?Sized,
{
    select_with_rng(category, rule, repository, &mut rand::thread_rng())
}

/// Select a question set for `category`, drawing from the supplied RNG.
pub fn select_with_rng<R, G>(
    category: Category,
    rule: &CategoryRule,
    repository: &R,
    rng: &mut G,
) -> QuestionSet
where
    R: QuestionRepository + ?Sized,
    G: Rng + ?Sized,
{
    let mut chosen: Vec<Arc<Question>> = Vec::new();
    let mut chosen_ids: HashSet<QuestionId> = HashSet::new();
    let mut leftovers: Vec<Arc<Question>> = Vec::new();
    let mut remaining = i64::from(rule.budget());

    for difficulty in Difficulty::ALL {
        let mut pool = repository.questions_of(category, difficulty, &chosen_ids);
        let wanted = rule.min_for(difficulty) as usize;
        let quantity = wanted.min(pool.len());

        if quantity < wanted {
            tracing::warn!(
                %category,
                %difficulty,
                wanted,
                available = pool.len(),
                "not enough questions in tier, taking all of them"
            );
        }

        let (drawn, rest) = pool.partial_shuffle(rng, quantity);
        for q in drawn.iter() {
            chosen_ids.insert(q.id);
            chosen.push(Arc::clone(q));
        }
        leftovers.extend(rest.iter().cloned());
        remaining -= quantity as i64 * i64::from(difficulty.weight());

        tracing::debug!(%category, %difficulty, drawn = quantity, remaining, "tier minimum drawn");
    }

    while remaining > 0 && !leftovers.is_empty() {
        let idx = rng.gen_range(0..leftovers.len());
        let q = leftovers.swap_remove(idx);
        remaining -= i64::from(q.weight());
        chosen.push(q);
    }

    let set = QuestionSet::new(category, *rule, chosen);
    tracing::info!(
        %category,
        rule = %rule,
        size = set.len(),
        weight = set.total_weight(),
        remaining,
        "question set selected"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn q(id: u64, category: Category, difficulty: Difficulty) -> Question {
        Question {
            id: QuestionId(id),
            category,
            difficulty,
            text: format!("question {id}"),
            answer: None,
            time_limits: vec![],
        }
    }

    /// `easy`, `medium` and `hard` questions of one category, ids from 1.
    fn bank_with(category: Category, easy: u64, medium: u64, hard: u64) -> QuestionBank {
        let mut bank = QuestionBank::new();
        let mut id = 1;
        for (count, difficulty) in [
            (easy, Difficulty::Easy),
            (medium, Difficulty::Medium),
            (hard, Difficulty::Hard),
        ] {
            for _ in 0..count {
                bank.insert(q(id, category, difficulty)).unwrap();
                id += 1;
            }
        }
        bank
    }

    #[test]
    fn exhausts_pool_before_budget() {
        // E1=1, E2=2, M1=3
        let bank = bank_with(Category::Behavioral, 2, 1, 0);
        let rule = CategoryRule::new(6, 1, 1, 0).unwrap();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = select_with_rng(Category::Behavioral, &rule, &bank, &mut rng);
            assert_eq!(set.len(), 3);
            assert_eq!(set.total_weight(), 4);
            assert!(set.contains(QuestionId(3)));
            assert_eq!(set.count_of(Difficulty::Easy), 2);
        }
    }

    #[test]
    fn never_selects_duplicates() {
        let bank = bank_with(Category::Coding, 10, 10, 10);
        let rule = CategoryRule::new(20, 2, 2, 1).unwrap();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = select_with_rng(Category::Coding, &rule, &bank, &mut rng);
            let unique: HashSet<_> = set.ids().into_iter().collect();
            assert_eq!(unique.len(), set.len(), "duplicate in seed {seed}");
        }
    }

    #[test]
    fn meets_minimums_when_bank_is_large_enough() {
        let bank = bank_with(Category::Coding, 5, 5, 5);
        let rule = CategoryRule::new(9, 2, 2, 0).unwrap();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = select_with_rng(Category::Coding, &rule, &bank, &mut rng);
            for difficulty in Difficulty::ALL {
                assert!(set.count_of(difficulty) >= rule.min_for(difficulty) as usize);
            }
        }
    }

    #[test]
    fn under_supplied_tier_takes_everything() {
        // One hard question where the rule wants two.
        let bank = bank_with(Category::Theoretical, 3, 3, 1);
        let rule = CategoryRule::new(6, 0, 0, 2).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let set = select_with_rng(Category::Theoretical, &rule, &bank, &mut rng);
        assert_eq!(set.count_of(Difficulty::Hard), 1);
        assert!(set.total_weight() >= 6);
    }

    #[test]
    fn stops_once_budget_is_spent() {
        let bank = bank_with(Category::Coding, 20, 20, 20);
        let rule = CategoryRule::new(9, 1, 1, 0).unwrap();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = select_with_rng(Category::Coding, &rule, &bank, &mut rng);
            let weight = set.total_weight();
            assert!(weight >= 9, "undershoot {weight} with seed {seed}");
            // Overshoot is bounded by one hard question.
            assert!(weight <= 9 + 2, "overshoot {weight} with seed {seed}");
        }
    }

    #[test]
    fn zero_rule_selects_nothing() {
        let bank = bank_with(Category::Coding, 3, 3, 3);
        let set = select(Category::Coding, &CategoryRule::zero(), &bank);
        assert!(set.is_empty());
    }

    #[test]
    fn empty_bank_yields_empty_set() {
        let bank = QuestionBank::new();
        let rule = CategoryRule::new(9, 2, 2, 0).unwrap();
        let set = select(Category::Coding, &rule, &bank);
        assert!(set.is_empty());
        assert_eq!(set.rule, rule);
    }

    #[test]
    fn only_draws_from_requested_category() {
        let mut bank = bank_with(Category::Coding, 2, 2, 2);
        bank.insert(q(100, Category::Behavioral, Difficulty::Easy))
            .unwrap();
        let rule = CategoryRule::new(30, 0, 0, 0).unwrap();

        let set = select(Category::Coding, &rule, &bank);
        assert_eq!(set.len(), 6);
        assert!(set.iter().all(|q| q.category == Category::Coding));
        assert_eq!(bank.len(), 7, "selection must not consume the bank");
    }

    #[test]
    fn same_seed_same_selection() {
        let bank = bank_with(Category::Coding, 10, 10, 10);
        let rule = CategoryRule::new(12, 1, 1, 1).unwrap();

        let a = select_with_rng(Category::Coding, &rule, &bank, &mut StdRng::seed_from_u64(42));
        let b = select_with_rng(Category::Coding, &rule, &bank, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.ids(), b.ids());
    }

    #[test]
    fn tier_draw_is_roughly_uniform() {
        let bank = bank_with(Category::Behavioral, 4, 0, 0);
        let rule = CategoryRule::new(1, 1, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut counts = [0usize; 4];

        for _ in 0..4000 {
            let set = select_with_rng(Category::Behavioral, &rule, &bank, &mut rng);
            assert_eq!(set.len(), 1);
            counts[(set.ids()[0].0 - 1) as usize] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            assert!((800..1200).contains(&c), "question {} drawn {c} times", i + 1);
        }
    }

    #[test]
    fn minimums_filling_the_budget_add_nothing_more() {
        let bank = bank_with(Category::Coding, 5, 5, 5);
        let rule = CategoryRule::new(9, 2, 2, 1).unwrap();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = select_with_rng(Category::Coding, &rule, &bank, &mut rng);
            assert_eq!(set.len(), 5, "seed {seed}");
            assert_eq!(set.total_weight(), 9);
            assert_eq!(set.count_of(Difficulty::Easy), 2);
            assert_eq!(set.count_of(Difficulty::Medium), 2);
            assert_eq!(set.count_of(Difficulty::Hard), 1);
        }
    }

    #[test]
    fn fill_draw_is_roughly_uniform_across_tiers() {
        // No minimums, so the single question comes from the mixed leftover pool.
        // ids: 1, 2 easy; 3 medium; 4 hard
        let bank = bank_with(Category::Coding, 2, 1, 1);
        let rule = CategoryRule::new(1, 0, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let mut counts = [0usize; 4];

        for _ in 0..4000 {
            let set = select_with_rng(Category::Coding, &rule, &bank, &mut rng);
            assert_eq!(set.len(), 1);
            counts[(set.ids()[0].0 - 1) as usize] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            assert!((800..1200).contains(&c), "question {} drawn {c} times", i + 1);
        }
    }
}
