//! In-memory question bank.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::error::QuizError;
use crate::model::{Category, Difficulty, Question, QuestionId};
use crate::traits::QuestionRepository;

/// A question bank held in memory, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: BTreeMap<QuestionId, Arc<Question>>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bank from a list of questions, rejecting duplicate ids.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Result<Self, QuizError> {
        let mut bank = Self::new();
        for q in questions {
            bank.insert(q)?;
        }
        Ok(bank)
    }

    pub fn insert(&mut self, question: Question) -> Result<(), QuizError> {
        if self.questions.contains_key(&question.id) {
            return Err(QuizError::DuplicateQuestion(question.id));
        }
        self.questions.insert(question.id, Arc::new(question));
        Ok(())
    }

    pub fn get(&self, id: QuestionId) -> Option<Arc<Question>> {
        self.questions.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Question>> {
        self.questions.values()
    }

    /// Number of questions in one category and tier.
    pub fn count(&self, category: Category, difficulty: Difficulty) -> usize {
        self.questions
            .values()
            .filter(|q| q.category == category && q.difficulty == difficulty)
            .count()
    }
}

impl QuestionRepository for QuestionBank {
    fn questions_of(
        &self,
        category: Category,
        difficulty: Difficulty,
        exclude: &HashSet<QuestionId>,
    ) -> Vec<Arc<Question>> {
        self.questions
            .values()
            .filter(|q| q.category == category && q.difficulty == difficulty)
            .filter(|q| !exclude.contains(&q.id))
            .cloned()
            .collect()
    }
}
