use thiserror::Error;

use crate::model::ids::{AnswerId, QuestionId};

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// One selectable choice of a `Question`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id: AnswerId,
    text: String,
    is_correct: bool,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: AnswerId::new(),
            text: text.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn correct(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    #[must_use]
    pub fn incorrect(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    #[must_use]
    pub fn id(&self) -> AnswerId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("a question needs at least two answers, got {0}")]
    TooFewAnswers(usize),

    #[error("a question needs exactly one correct answer, got {0}")]
    CorrectAnswerCount(usize),
}

/// A display-ready multiple-choice question.
///
/// Answers keep the order they were given in; callers that want a random
/// order shuffle before constructing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    answers: Vec<Answer>,
    category: String,
    difficulty: String,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if fewer than two answers are given or the
    /// number of correct answers is not exactly one.
    pub fn new(
        text: impl Into<String>,
        answers: Vec<Answer>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        if answers.len() < 2 {
            return Err(QuestionError::TooFewAnswers(answers.len()));
        }
        let correct = answers.iter().filter(|a| a.is_correct()).count();
        if correct != 1 {
            return Err(QuestionError::CorrectAnswerCount(correct));
        }

        Ok(Self {
            id: QuestionId::new(),
            text: text.into(),
            answers,
            category: category.into(),
            difficulty: difficulty.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Looks up one of this question's answers by id.
    #[must_use]
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id() == id)
    }

    /// The single correct answer.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct())
    }

    /// Position of the correct answer within `answers`.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(Answer::is_correct)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
