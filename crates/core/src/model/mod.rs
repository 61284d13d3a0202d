mod ids;
mod question;
mod trivia;

pub use ids::{AnswerId, QuestionId};
pub use question::{Answer, Question, QuestionError};
pub use trivia::{RawBatch, RawQuestion, ResponseCode};
