mod support;

use proptest::prelude::*;
use quiz_core::model::{Answer, RawBatch};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::quiz::{QuizEffect, QuizEngine};
use services::{QuestionTransformer, QuizSettings};
use support::batch;

#[derive(Debug, Clone)]
enum Op {
    /// Submit the answer at this slot of the current question.
    Answer(usize),
    /// Let the most recent scheduled advance fire.
    Fire,
    Advance,
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..4).prop_map(Op::Answer),
        3 => Just(Op::Fire),
        1 => Just(Op::Advance),
        1 => Just(Op::Reset),
    ]
}

fn fetch_generation(effects: &[QuizEffect]) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        QuizEffect::Fetch(request) => Some(request.generation),
        _ => None,
    })
}

proptest! {
    #[test]
    fn score_is_monotonic_and_bounded(
        seed in any::<u64>(),
        size in 1usize..6,
        ops in proptest::collection::vec(op(), 1..60),
    ) {
        let mut engine = QuizEngine::with_rng(QuizSettings::default(), StdRng::seed_from_u64(seed));
        let generation = fetch_generation(&engine.start()).unwrap();
        engine.finish_load(generation, Ok(batch(size)));

        let mut last_ticket = None;
        let mut last_score = 0;
        let mut was_game_over = false;

        for op in ops {
            match op {
                Op::Answer(slot) => {
                    let answer: Option<Answer> = engine
                        .current_question()
                        .ok()
                        .and_then(|q| q.answers().get(slot).cloned());
                    if let Some(answer) = answer {
                        let before = engine.state().score();
                        let locked = engine.state().selected_answer().is_some();
                        match engine.submit_answer(&answer) {
                            Ok(QuizEffect::ScheduleAdvance { ticket, .. }) => {
                                prop_assert!(!locked);
                                last_ticket = Some(ticket);
                            }
                            Ok(other) => prop_assert!(false, "unexpected effect {:?}", other),
                            Err(_) => prop_assert_eq!(engine.state().score(), before),
                        }
                    }
                }
                Op::Fire => {
                    if let Some(ticket) = last_ticket.take() {
                        engine.advance_due(ticket);
                    }
                }
                Op::Advance => {
                    let answered = engine.state().can_proceed();
                    let before = engine.state().current_index();
                    let effects = engine.advance();
                    if !answered {
                        prop_assert!(effects.is_empty());
                        prop_assert_eq!(engine.state().current_index(), before);
                    }
                }
                Op::Reset => {
                    let generation = fetch_generation(&engine.reset()).unwrap();
                    engine.finish_load(generation, Ok(batch(size)));
                    last_score = 0;
                    was_game_over = false;
                    let state = engine.state();
                    prop_assert_eq!(state.current_index(), 0);
                    prop_assert_eq!(state.score(), 0);
                    prop_assert!(!state.is_game_over());
                }
            }

            let state = engine.state();
            prop_assert!(state.score() >= last_score);
            prop_assert!((state.score() as usize) <= state.current_index() + 1);
            prop_assert!(state.current_index() < state.total());
            prop_assert!((0.0..=1.0).contains(&state.progress()));
            if let Some(selected) = state.selected_answer() {
                let current = state.current_question().unwrap();
                prop_assert!(current.answer(selected.id()).is_some());
            }
            if state.is_game_over() {
                // Game over is only reachable by answering the last question.
                prop_assert_eq!(state.current_index() + 1, state.total());
                prop_assert!(state.selected_answer().is_some());
                prop_assert!(state.summary().is_some());
            }
            if was_game_over {
                prop_assert!(state.is_game_over());
            }
            was_game_over = state.is_game_over();
            last_score = state.score();
        }
    }

    #[test]
    fn every_record_yields_one_correct_answer(
        seed in any::<u64>(),
        size in 1usize..20,
    ) {
        let raw: RawBatch = batch(size);
        let questions = QuestionTransformer::new(StdRng::seed_from_u64(seed)).to_questions(&raw);

        prop_assert_eq!(questions.len(), size);
        for (question, record) in questions.iter().zip(&raw.results) {
            prop_assert_eq!(question.answers().len(), 1 + record.incorrect_answers.len());
            prop_assert_eq!(question.answers().iter().filter(|a| a.is_correct()).count(), 1);
        }
    }
}

#[test]
fn game_over_is_sticky() {
    let mut engine = QuizEngine::with_rng(QuizSettings::default(), StdRng::seed_from_u64(5));
    let generation = fetch_generation(&engine.start()).unwrap();
    engine.finish_load(generation, Ok(batch(2)));

    for _ in 0..2 {
        let answer = engine.current_question().unwrap().answers()[0].clone();
        engine.submit_answer(&answer).unwrap();
        engine.advance();
    }
    assert!(engine.state().is_game_over());
    let finished = engine.state().summary().unwrap().finished_at;

    for _ in 0..5 {
        assert!(engine.advance().is_empty());
        assert!(engine.state().is_game_over());
        assert_eq!(engine.state().current_index(), 1);
        assert_eq!(engine.state().summary().unwrap().finished_at, finished);
    }
}

#[test]
fn skipping_without_answers_never_ends_the_game() {
    let mut engine = QuizEngine::with_rng(QuizSettings::default(), StdRng::seed_from_u64(3));
    let generation = fetch_generation(&engine.start()).unwrap();
    engine.finish_load(generation, Ok(batch(3)));

    for _ in 0..3 {
        assert!(engine.advance().is_empty());
    }

    let state = engine.state();
    assert!(!state.is_game_over());
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.score(), 0);
    assert!(state.selected_answer().is_none());
}
