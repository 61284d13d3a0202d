use chrono::{DateTime, Utc};

use quiz_core::model::{Answer, Question};

use crate::error::QuizError;

/// Where the session is in its lifecycle, derived from `SessionState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Nothing loaded yet.
    Idle,
    Loading,
    /// First question shown, nothing answered.
    Ready,
    /// Waiting on an answer for a later question.
    Answering,
    /// Answer locked, auto-advance pending.
    Advancing,
    GameOver,
    Error,
}

/// Final score report, available once the batch is exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// The single mutable aggregate of a quiz session.
///
/// Only `QuizEngine` mutates it; observers receive clones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    selected_answer: Option<Answer>,
    progress: f64,
    is_loading: bool,
    error_message: Option<String>,
    is_game_over: bool,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl SessionState {
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&Answer> {
        self.selected_answer.as_ref()
    }

    /// Display progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// An answer is locked in and the session is waiting to move on.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.selected_answer.is_some() && !self.is_game_over
    }

    /// The question at `current_index`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OutOfRange` when no questions are loaded.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.questions
            .get(self.current_index)
            .ok_or(QuizError::OutOfRange {
                index: self.current_index,
                len: self.questions.len(),
            })
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_loading {
            QuizPhase::Loading
        } else if self.error_message.is_some() {
            QuizPhase::Error
        } else if self.is_game_over {
            QuizPhase::GameOver
        } else if self.questions.is_empty() {
            QuizPhase::Idle
        } else if self.selected_answer.is_some() {
            QuizPhase::Advancing
        } else if self.current_index == 0 {
            QuizPhase::Ready
        } else {
            QuizPhase::Answering
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        if !self.is_game_over {
            return None;
        }
        Some(QuizSummary {
            score: self.score,
            total: self.questions.len(),
            started_at: self.started_at?,
            finished_at: self.finished_at?,
        })
    }

    //
    // ─── MUTATIONS (engine only) ───────────────────────────────────────────────
    //

    pub(crate) fn begin_loading(&mut self) {
        self.questions.clear();
        self.current_index = 0;
        self.score = 0;
        self.selected_answer = None;
        self.progress = 0.0;
        self.is_loading = true;
        self.error_message = None;
        self.is_game_over = false;
        self.started_at = None;
        self.finished_at = None;
    }

    pub(crate) fn load(&mut self, questions: Vec<Question>, started_at: DateTime<Utc>) {
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.selected_answer = None;
        self.progress = 0.0;
        self.is_loading = false;
        self.error_message = None;
        self.is_game_over = false;
        self.started_at = Some(started_at);
        self.finished_at = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error_message = Some(message);
    }

    pub(crate) fn select(&mut self, answer: Answer) {
        if answer.is_correct() {
            self.score += 1;
        }
        self.selected_answer = Some(answer);
    }

    /// Move to the next question, or end the game after the last one.
    pub(crate) fn step(&mut self, now: DateTime<Utc>) {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.selected_answer = None;
            self.progress = progress_for(self.current_index, self.questions.len());
        } else {
            self.is_game_over = true;
            self.finished_at = Some(now);
        }
    }
}

/// `index / max(len - 1, 1)`, or 0 for a single question.
#[must_use]
pub fn progress_for(index: usize, len: usize) -> f64 {
    let denominator = len.saturating_sub(1).max(1);
    #[allow(clippy::cast_precision_loss)]
    let ratio = index as f64 / denominator as f64;
    ratio.clamp(0.0, 1.0)
}
