//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ResponseCode;

/// Errors emitted by `TriviaClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaError {
    #[error("invalid trivia endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("could not reach the trivia service: {0}")]
    Network(#[from] reqwest::Error),
    #[error("trivia service responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("failed to decode trivia response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TriviaError {
    /// Transport-level failure: no connectivity, timeout, or a non-2xx status.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, TriviaError::Network(_) | TriviaError::HttpStatus(_))
    }

    /// The body arrived but did not have the expected shape.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, TriviaError::Decode(_))
    }
}

/// Errors emitted by the quiz engine and its runtime.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Trivia(#[from] TriviaError),
    #[error("no usable questions were returned: {code}")]
    EmptyResult { code: ResponseCode },
    #[error("question index {index} is out of range for {len} questions")]
    OutOfRange { index: usize, len: usize },
    #[error("illegal transition: {0}")]
    IllegalTransition(&'static str),
    #[error("quiz runtime has stopped")]
    Stopped,
}
