use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use quiz_core::Clock;
use quiz_core::model::{Answer, Question, RawBatch};

use crate::config::QuizSettings;
use crate::error::{QuizError, TriviaError};
use crate::transformer::QuestionTransformer;

use super::state::SessionState;

//
// ─── EFFECTS ───────────────────────────────────────────────────────────────────
//

/// A batch request stamped with the load generation that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub amount: u32,
}

/// Identifies one scheduled auto-advance. Only the most recent ticket is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(u64);

/// Side effects requested by the engine; the runtime carries them out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizEffect {
    Fetch(LoadRequest),
    ScheduleAdvance { ticket: AdvanceTicket, delay: Duration },
    CancelAdvance,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Quiz state machine.
///
/// Owns the `SessionState` and is its only writer. Operations never block or
/// perform I/O; anything asynchronous comes back as a `QuizEffect` and re-enters
/// through `finish_load` or `advance_due`.
pub struct QuizEngine<R = StdRng> {
    state: SessionState,
    transformer: QuestionTransformer<R>,
    settings: QuizSettings,
    clock: Clock,
    generation: u64,
    next_ticket: u64,
    pending_advance: Option<AdvanceTicket>,
}

impl QuizEngine<StdRng> {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self::with_transformer(settings, QuestionTransformer::from_os_rng())
    }
}

impl<R: Rng> QuizEngine<R> {
    #[must_use]
    pub fn with_rng(settings: QuizSettings, rng: R) -> Self {
        Self::with_transformer(settings, QuestionTransformer::new(rng))
    }

    #[must_use]
    pub fn with_transformer(settings: QuizSettings, transformer: QuestionTransformer<R>) -> Self {
        Self {
            state: SessionState::default(),
            transformer,
            settings,
            clock: Clock::default(),
            generation: 0,
            next_ticket: 0,
            pending_advance: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Generation of the most recent load.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending_advance
    }

    /// # Errors
    ///
    /// Returns `QuizError::OutOfRange` when no questions are loaded.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.state.current_question()
    }

    /// Begin loading a fresh batch.
    ///
    /// Any earlier load still in flight is superseded: its result will carry an
    /// old generation and be dropped by `finish_load`.
    pub fn start(&mut self) -> Vec<QuizEffect> {
        self.generation += 1;
        let mut effects = Vec::with_capacity(2);
        if self.pending_advance.take().is_some() {
            effects.push(QuizEffect::CancelAdvance);
        }

        self.state.begin_loading();
        tracing::debug!(generation = self.generation, "loading question batch");

        effects.push(QuizEffect::Fetch(LoadRequest {
            generation: self.generation,
            amount: self.settings.batch_size(),
        }));
        effects
    }

    /// Apply the outcome of a fetch. Returns `false` if the result was stale.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<RawBatch, TriviaError>,
    ) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale batch"
            );
            return false;
        }

        match self.build_questions(result) {
            Ok(questions) => {
                tracing::info!(count = questions.len(), "question batch loaded");
                self.state.load(questions, self.clock.now());
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load questions");
                self.state.fail(err.to_string());
            }
        }
        true
    }

    fn build_questions(
        &mut self,
        result: Result<RawBatch, TriviaError>,
    ) -> Result<Vec<Question>, QuizError> {
        let batch = result?;
        let questions = self.transformer.to_questions(&batch);
        if questions.is_empty() {
            return Err(QuizError::EmptyResult {
                code: batch.response_code,
            });
        }
        Ok(questions)
    }

    /// Lock in an answer for the current question and schedule the advance.
    ///
    /// The first answer wins; later calls for the same question are rejected
    /// without touching state.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::IllegalTransition` if no question is awaiting an
    /// answer, an answer is already locked, or `answer` is not one of the
    /// current question's answers.
    pub fn submit_answer(&mut self, answer: &Answer) -> Result<QuizEffect, QuizError> {
        if self.state.is_loading() || self.state.is_game_over() {
            return Err(QuizError::IllegalTransition("no question is awaiting an answer"));
        }
        if self.state.selected_answer().is_some() {
            return Err(QuizError::IllegalTransition("answer already locked for this question"));
        }

        let question = self
            .state
            .current_question()
            .map_err(|_| QuizError::IllegalTransition("no question is awaiting an answer"))?;
        let chosen = question
            .answer(answer.id())
            .cloned()
            .ok_or(QuizError::IllegalTransition(
                "answer does not belong to the current question",
            ))?;

        tracing::debug!(
            index = self.state.current_index(),
            question = %question.id(),
            correct = chosen.is_correct(),
            "answer submitted"
        );
        self.state.select(chosen);

        let ticket = AdvanceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_advance = Some(ticket);

        Ok(QuizEffect::ScheduleAdvance {
            ticket,
            delay: self.settings.advance_delay(),
        })
    }

    /// Move to the next question, or end the game after the last one.
    ///
    /// Only an answered question can be left behind: without a locked answer,
    /// after game over, or while nothing is loaded this is a no-op. Cancels any
    /// pending auto-advance.
    pub fn advance(&mut self) -> Vec<QuizEffect> {
        if !self.state.can_proceed() {
            tracing::debug!(index = self.state.current_index(), "nothing to advance from");
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.pending_advance.take().is_some() {
            effects.push(QuizEffect::CancelAdvance);
        }

        self.state.step(self.clock.now());
        if self.state.is_game_over() {
            tracing::info!(
                score = self.state.score(),
                total = self.state.total(),
                "quiz finished"
            );
        } else {
            tracing::debug!(index = self.state.current_index(), "advanced");
        }
        effects
    }

    /// Timer callback for a scheduled advance. Returns `false` for superseded
    /// tickets.
    pub fn advance_due(&mut self, ticket: AdvanceTicket) -> bool {
        if self.pending_advance != Some(ticket) {
            tracing::debug!(?ticket, "ignoring stale advance");
            return false;
        }
        self.pending_advance = None;
        self.advance();
        true
    }

    /// Clear the session and load a new batch.
    pub fn reset(&mut self) -> Vec<QuizEffect> {
        tracing::debug!("resetting quiz");
        self.start()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
