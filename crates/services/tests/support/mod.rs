#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{RawBatch, RawQuestion, ResponseCode};
use services::{QuizHandle, SessionState, TriviaError, TriviaSource};

pub fn raw_question(text: &str) -> RawQuestion {
    RawQuestion {
        category: "General Knowledge".into(),
        kind: "multiple".into(),
        difficulty: "easy".into(),
        question: text.into(),
        correct_answer: "right".into(),
        incorrect_answers: vec!["wrong a".into(), "wrong b".into(), "wrong c".into()],
    }
}

pub fn batch(n: usize) -> RawBatch {
    RawBatch {
        response_code: ResponseCode::Success,
        results: (1..=n).map(|i| raw_question(&format!("Question {i}"))).collect(),
    }
}

/// Replays queued responses in order, each after an optional delay.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<(Duration, Result<RawBatch, TriviaError>)>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, result: Result<RawBatch, TriviaError>) -> Self {
        self.then_after(Duration::ZERO, result)
    }

    pub fn then_after(self, delay: Duration, result: Result<RawBatch, TriviaError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((delay, result));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TriviaSource for ScriptedSource {
    async fn fetch_batch(&self, _amount: u32) -> Result<RawBatch, TriviaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(RawBatch {
                response_code: ResponseCode::NoResults,
                results: Vec::new(),
            }),
        }
    }
}

/// Wait for a snapshot matching `pred`, failing after a minute of (virtual) time.
pub async fn wait_until(
    handle: &QuizHandle,
    pred: impl FnMut(&SessionState) -> bool,
) -> SessionState {
    let mut rx = handle.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(60), rx.wait_for(pred))
        .await
        .expect("timed out waiting for quiz state")
        .expect("quiz runtime stopped")
        .clone();
    state
}
