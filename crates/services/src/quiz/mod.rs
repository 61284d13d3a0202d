mod clock;
mod engine;
mod runtime;
mod state;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use clock::{ScheduleHandle, SessionClock};
pub use engine::{AdvanceTicket, LoadRequest, QuizEffect, QuizEngine};
pub use runtime::{QuizHandle, QuizRuntime};
pub use state::{QuizPhase, QuizSummary, SessionState, progress_for};
