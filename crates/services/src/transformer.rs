use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use quiz_core::model::{Answer, Question, QuestionError, RawBatch, RawQuestion};
use quiz_core::text::normalize;

/// Turns raw API records into display-ready questions.
///
/// Each question's answers are shuffled with the transformer's random source,
/// so a seeded generator gives reproducible orderings.
pub struct QuestionTransformer<R = StdRng> {
    rng: R,
}

impl QuestionTransformer<StdRng> {
    /// Transformer backed by an OS-seeded generator.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> QuestionTransformer<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Convert a batch. A non-success response code yields no questions.
    ///
    /// Records that cannot form a valid question are skipped.
    pub fn to_questions(&mut self, batch: &RawBatch) -> Vec<Question> {
        if !batch.response_code.is_success() {
            tracing::debug!(code = %batch.response_code, "batch not successful, no questions");
            return Vec::new();
        }

        batch
            .results
            .iter()
            .filter_map(|raw| match self.to_question(raw) {
                Ok(question) => Some(question),
                Err(err) => {
                    tracing::warn!(question = %raw.question, %err, "skipping malformed question");
                    None
                }
            })
            .collect()
    }

    /// Convert a single record, shuffling its answers.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the record has no incorrect answers.
    pub fn to_question(&mut self, raw: &RawQuestion) -> Result<Question, QuestionError> {
        let mut answers: Vec<Answer> = raw
            .incorrect_answers
            .iter()
            .map(|text| Answer::incorrect(normalize(text)))
            .collect();
        answers.push(Answer::correct(normalize(&raw.correct_answer)));
        answers.shuffle(&mut self.rng);

        Question::new(
            normalize(&raw.question),
            answers,
            normalize(&raw.category),
            normalize(&raw.difficulty),
        )
    }
}
