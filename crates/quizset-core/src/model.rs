//! Core data model types for quizset.
//!
//! Questions, the per-category quota rules, the selected question sets, and
//! the compound key the score ledger is indexed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::QuizError;

/// Question categories. Every game deals one set per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Behavioral,
    Theoretical,
    Coding,
}

impl Category {
    /// All categories in the order a game deals them.
    pub const ALL: [Category; 3] = [Category::Behavioral, Category::Theoretical, Category::Coding];

    /// Single-letter code used by older bank files.
    pub fn code(self) -> char {
        match self {
            Category::Behavioral => 'B',
            Category::Theoretical => 'T',
            Category::Coding => 'C',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Behavioral => write!(f, "behavioral"),
            Category::Theoretical => write!(f, "theoretical"),
            Category::Coding => write!(f, "coding"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "behavioral" | "behavioural" | "b" => Ok(Category::Behavioral),
            "theoretical" | "t" => Ok(Category::Theoretical),
            "coding" | "c" => Ok(Category::Coding),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Difficulty tier. The discriminant is the tier's weight against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    /// Tiers in ascending order; selection satisfies minimums in this order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Points charged against a category budget per question of this tier.
    pub fn weight(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

// Stored as the integer ordinal, matching the bank format.
impl Serialize for Difficulty {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        Difficulty::from_ordinal(n).ok_or_else(|| {
            serde::de::Error::custom(format!("difficulty must be 1, 2 or 3, got {n}"))
        })
    }
}

/// Question identifier. Identifiers are 1-based; `0` means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

impl QuestionId {
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        QuestionId(id)
    }
}

/// A single bank question. Never mutated after it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: QuestionId,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Text shown to the player.
    pub text: String,
    /// Reference answer, if the bank provides one.
    #[serde(default)]
    pub answer: Option<String>,
    /// Time limits in seconds, one per answering stage.
    #[serde(default)]
    pub time_limits: Vec<u32>,
}

impl Question {
    pub fn weight(&self) -> u32 {
        self.difficulty.weight()
    }
}

/// Quota rule for one category: a difficulty-point budget plus the minimum
/// number of questions required from each tier.
///
/// The minimums always fit inside the budget. Fields are private, so a rule
/// only comes from [`CategoryRule::new`], [`CategoryRule::zero`] or
/// deserialization:
///
/// ```compile_fail
/// use quizset_core::model::CategoryRule;
///
/// let rule = CategoryRule { budget: 1, min_easy: 0, min_medium: 0, min_hard: 4 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct CategoryRule {
    budget: u32,
    min_easy: u32,
    min_medium: u32,
    min_hard: u32,
}

/// A rule as written in a config file, before its minimums are checked.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawRule {
    budget: u32,
    #[serde(default)]
    min_easy: u32,
    #[serde(default)]
    min_medium: u32,
    #[serde(default)]
    min_hard: u32,
}

impl TryFrom<RawRule> for CategoryRule {
    type Error = QuizError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        CategoryRule::new(raw.budget, raw.min_easy, raw.min_medium, raw.min_hard)
    }
}

impl CategoryRule {
    /// Build a rule, rejecting minimums whose combined weight exceeds the budget.
    pub fn new(budget: u32, min_easy: u32, min_medium: u32, min_hard: u32) -> Result<Self, QuizError> {
        Self::checked(budget, min_easy, min_medium, min_hard).ok_or_else(|| {
            let needed = weight_of(min_easy, min_medium, min_hard);
            QuizError::ConfigurationError {
                category: None,
                reason: format!("minimums need {needed} points but the budget is {budget}"),
            }
        })
    }

    /// `const` form of [`CategoryRule::new`], for built-in rule tables.
    pub(crate) const fn checked(budget: u32, min_easy: u32, min_medium: u32, min_hard: u32) -> Option<Self> {
        if weight_of(min_easy, min_medium, min_hard) > budget as u64 {
            return None;
        }
        Some(Self {
            budget,
            min_easy,
            min_medium,
            min_hard,
        })
    }

    /// The rule that selects nothing.
    pub const fn zero() -> Self {
        Self {
            budget: 0,
            min_easy: 0,
            min_medium: 0,
            min_hard: 0,
        }
    }

    /// Difficulty points a set drawn under this rule aims for.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn min_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.min_easy,
            Difficulty::Medium => self.min_medium,
            Difficulty::Hard => self.min_hard,
        }
    }

    /// Combined weight of all tier minimums.
    pub fn minimum_weight(&self) -> u64 {
        weight_of(self.min_easy, self.min_medium, self.min_hard)
    }

    /// Number of questions the minimums alone ask for.
    pub fn minimum_count(&self) -> u32 {
        self.min_easy + self.min_medium + self.min_hard
    }
}

const fn weight_of(easy: u32, medium: u32, hard: u32) -> u64 {
    easy as u64 * Difficulty::Easy as u64
        + medium as u64 * Difficulty::Medium as u64
        + hard as u64 * Difficulty::Hard as u64
}

impl fmt::Display for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.budget, self.min_easy, self.min_medium, self.min_hard
        )
    }
}

/// Questions selected for one category of one game.
///
/// Selection is without replacement, so a set never holds the same question
/// twice. Order carries no meaning.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    pub category: Category,
    pub rule: CategoryRule,
    questions: Vec<Arc<Question>>,
}

impl QuestionSet {
    pub(crate) fn new(category: Category, rule: CategoryRule, questions: Vec<Arc<Question>>) -> Self {
        Self {
            category,
            rule,
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.questions.iter().any(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Question>> {
        self.questions.iter()
    }

    pub fn ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.id).collect()
    }

    /// Sum of the difficulty weights of the remaining questions.
    pub fn total_weight(&self) -> u32 {
        self.questions.iter().map(|q| q.weight()).sum()
    }

    pub fn count_of(&self, difficulty: Difficulty) -> usize {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .count()
    }

    /// Remove and return one question, or `None` once the set is used up.
    pub fn take_next(&mut self) -> Option<Arc<Question>> {
        self.questions.pop()
    }

    /// Remove a specific question if it is still in the set.
    pub fn remove(&mut self, id: QuestionId) -> Option<Arc<Question>> {
        let pos = self.questions.iter().position(|q| q.id == id)?;
        Some(self.questions.swap_remove(pos))
    }
}

/// Compound ledger key: one entry per (user, question) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScoreKey {
    pub user_id: String,
    pub question_id: QuestionId,
}

impl ScoreKey {
    pub fn new(user_id: impl Into<String>, question_id: QuestionId) -> Self {
        Self {
            user_id: user_id.into(),
            question_id,
        }
    }
}

/// Rendered as `user--qid`, the record id used by persistent stores.
impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.user_id, self.question_id)
    }
}

impl FromStr for ScoreKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // User names may themselves contain "--"; the id is after the last one.
        let (user, qid) = s
            .rsplit_once("--")
            .ok_or_else(|| format!("malformed score key: {s}"))?;
        let qid: u64 = qid
            .parse()
            .map_err(|_| format!("malformed question id in score key: {s}"))?;
        Ok(ScoreKey::new(user, QuestionId(qid)))
    }
}
