//! Event loop that owns a `QuizEngine` and carries out its effects.
//!
//! Everything that mutates the session (player commands, fetch completions,
//! timer expiries) is funneled through one task and handled in arrival order.
//! Observers get state snapshots over a `watch` channel.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::AbortHandle;

use quiz_core::model::{Answer, RawBatch};

use crate::error::{QuizError, TriviaError};
use crate::trivia_client::TriviaSource;

use super::clock::SessionClock;
use super::engine::{AdvanceTicket, QuizEffect, QuizEngine};
use super::state::SessionState;

enum Command {
    Start(oneshot::Sender<()>),
    Submit(Answer, oneshot::Sender<()>),
    Reset(oneshot::Sender<()>),
}

enum Event {
    Loaded {
        generation: u64,
        result: Result<RawBatch, TriviaError>,
    },
    AdvanceDue(AdvanceTicket),
}

/// Presentation-facing handle to a running quiz.
///
/// Cheap to clone. The runtime stops once every handle is dropped.
#[derive(Clone)]
pub struct QuizHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<SessionState>,
}

impl QuizHandle {
    /// Request a fresh batch. Returns once the session is in `Loading`; the
    /// outcome arrives through `subscribe`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stopped` if the runtime is gone.
    pub async fn start(&self) -> Result<(), QuizError> {
        self.send(Command::Start).await
    }

    /// Submit an answer for the current question. Duplicate or out-of-place
    /// submissions are ignored. The session moves on by itself once the
    /// advance delay has passed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stopped` if the runtime is gone.
    pub async fn submit_answer(&self, answer: &Answer) -> Result<(), QuizError> {
        let answer = answer.clone();
        self.send(|ack| Command::Submit(answer, ack)).await
    }

    /// Drop the current session and load a new one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stopped` if the runtime is gone.
    pub async fn reset(&self) -> Result<(), QuizError> {
        self.send(Command::Reset).await
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    async fn send(
        &self,
        make: impl FnOnce(oneshot::Sender<()>) -> Command,
    ) -> Result<(), QuizError> {
        let (ack, done) = oneshot::channel();
        self.commands
            .send(make(ack))
            .map_err(|_| QuizError::Stopped)?;
        done.await.map_err(|_| QuizError::Stopped)
    }
}

/// Single owner of a `QuizEngine`.
pub struct QuizRuntime<R> {
    engine: QuizEngine<R>,
    source: Arc<dyn TriviaSource>,
    clock: SessionClock,
    fetch: Option<AbortHandle>,
    commands: mpsc::UnboundedReceiver<Command>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    state_tx: watch::Sender<SessionState>,
}

impl<R: Rng + Send + 'static> QuizRuntime<R> {
    /// Spawn the loop on the current tokio runtime.
    #[must_use]
    pub fn spawn(engine: QuizEngine<R>, source: Arc<dyn TriviaSource>) -> QuizHandle {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(engine.state().clone());

        let runtime = Self {
            engine,
            source,
            clock: SessionClock::new(),
            fetch: None,
            commands,
            events_tx,
            events_rx,
            state_tx,
        };
        tokio::spawn(runtime.run());

        QuizHandle {
            commands: commands_tx,
            state: state_rx,
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = self.events_rx.recv() => self.handle_event(event),
            }
        }

        self.clock.cancel_pending();
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
        tracing::debug!("quiz runtime stopped");
    }

    fn handle_command(&mut self, command: Command) {
        let ack = match command {
            Command::Start(ack) => {
                let effects = self.engine.start();
                self.apply(effects);
                ack
            }
            Command::Reset(ack) => {
                let effects = self.engine.reset();
                self.apply(effects);
                ack
            }
            Command::Submit(answer, ack) => {
                match self.engine.submit_answer(&answer) {
                    Ok(effect) => self.apply(vec![effect]),
                    Err(err) => tracing::debug!(%err, "ignoring answer"),
                }
                ack
            }
        };
        self.publish();
        let _ = ack.send(());
    }

    fn handle_event(&mut self, event: Event) {
        let changed = match event {
            Event::Loaded { generation, result } => {
                if generation == self.engine.generation() {
                    self.fetch = None;
                }
                self.engine.finish_load(generation, result)
            }
            Event::AdvanceDue(ticket) => self.engine.advance_due(ticket),
        };
        if changed {
            self.publish();
        }
    }

    fn apply(&mut self, effects: Vec<QuizEffect>) {
        for effect in effects {
            match effect {
                QuizEffect::Fetch(request) => {
                    if let Some(previous) = self.fetch.take() {
                        previous.abort();
                    }
                    let source = Arc::clone(&self.source);
                    let events = self.events_tx.clone();
                    let task = tokio::spawn(async move {
                        let result = source.fetch_batch(request.amount).await;
                        let _ = events.send(Event::Loaded {
                            generation: request.generation,
                            result,
                        });
                    });
                    self.fetch = Some(task.abort_handle());
                }
                QuizEffect::ScheduleAdvance { ticket, delay } => {
                    let events = self.events_tx.clone();
                    self.clock.schedule(delay, move || {
                        let _ = events.send(Event::AdvanceDue(ticket));
                    });
                }
                QuizEffect::CancelAdvance => {
                    self.clock.cancel_pending();
                }
            }
        }
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.engine.state().clone());
    }
}
