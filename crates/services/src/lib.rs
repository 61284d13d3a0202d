#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod quiz;
pub mod transformer;
pub mod trivia_client;

pub use quiz_core::Clock;

pub use config::{QuestionKind, QuizSettings, TriviaConfig};
pub use error::{QuizError, TriviaError};
pub use transformer::QuestionTransformer;
pub use trivia_client::{TriviaClient, TriviaSource, decode_batch};

pub use quiz::{
    QuizEngine, QuizHandle, QuizPhase, QuizRuntime, QuizSummary, SessionClock, SessionState,
};
