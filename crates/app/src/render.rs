use std::fmt::Write;

use quiz_core::model::Question;
use services::{QuizPhase, SessionState};

use crate::input::HELP;

/// Text frame for one session snapshot.
pub fn render(state: &SessionState) -> String {
    match state.phase() {
        QuizPhase::Idle => format!("Press r to start a quiz.\n{HELP}\n"),
        QuizPhase::Loading => "Loading questions...\n".to_string(),
        QuizPhase::Error => format!(
            "Something went wrong: {}\nPress r to try again or q to quit.\n",
            state.error_message().unwrap_or("unknown error")
        ),
        QuizPhase::GameOver => render_game_over(state),
        QuizPhase::Ready | QuizPhase::Answering | QuizPhase::Advancing => {
            match state.current_question() {
                Ok(question) => render_question(state, question),
                Err(err) => format!("{err}\n"),
            }
        }
    }
}

fn render_question(state: &SessionState, question: &Question) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n[{}/{}] {} ({})   score: {}   progress: {:.0}%",
        state.current_index() + 1,
        state.total(),
        question.category(),
        question.difficulty(),
        state.score(),
        state.progress() * 100.0
    );
    let _ = writeln!(out, "{}", question.text());

    let selected = state.selected_answer();
    for (slot, answer) in question.answers().iter().enumerate() {
        let marker = match selected {
            Some(chosen) if chosen.id() == answer.id() && answer.is_correct() => "  <- correct!",
            Some(chosen) if chosen.id() == answer.id() => "  <- wrong",
            Some(_) if answer.is_correct() => "  <- answer",
            _ => "",
        };
        let _ = writeln!(out, "  {}) {}{marker}", slot + 1, answer.text());
    }
    out
}

fn render_game_over(state: &SessionState) -> String {
    let mut out = String::from("\nQuiz complete!\n");
    let _ = writeln!(out, "Final score: {} / {}", state.score(), state.total());
    if let Some(summary) = state.summary() {
        let secs = (summary.finished_at - summary.started_at).num_seconds();
        let _ = writeln!(out, "Time: {secs}s");
    }
    out.push_str("Press r to play again or q to quit.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{RawBatch, RawQuestion, ResponseCode};
    use services::{QuizEngine, QuizSettings};

    fn batch() -> RawBatch {
        RawBatch {
            response_code: ResponseCode::Success,
            results: vec![RawQuestion {
                category: "Art".into(),
                kind: "multiple".into(),
                difficulty: "hard".into(),
                question: "Who painted &quot;Guernica&quot;?".into(),
                correct_answer: "Picasso".into(),
                incorrect_answers: vec!["Dal&iacute;".into(), "Mir&oacute;".into(), "Goya".into()],
            }],
        }
    }

    fn loaded() -> QuizEngine {
        let mut engine = QuizEngine::new(QuizSettings::default());
        engine.start();
        engine.finish_load(engine.generation(), Ok(batch()));
        engine
    }

    #[test]
    fn renders_loading_and_idle() {
        let mut engine = QuizEngine::new(QuizSettings::default());
        assert!(render(engine.state()).contains("Press r to start"));
        engine.start();
        assert_eq!(render(engine.state()), "Loading questions...\n");
    }

    #[test]
    fn renders_question_with_numbered_answers() {
        let engine = loaded();
        let frame = render(engine.state());
        assert!(frame.contains("[1/1] Art (hard)"));
        assert!(frame.contains("Who painted \"Guernica\"?"));
        assert!(frame.contains("Dalí"));
        for slot in 1..=4 {
            assert!(frame.contains(&format!("  {slot}) ")));
        }
    }

    #[test]
    fn marks_wrong_choice_and_correct_answer() {
        let mut engine = loaded();
        let wrong = engine
            .current_question()
            .unwrap()
            .answers()
            .iter()
            .find(|a| a.text() == "Goya")
            .unwrap()
            .clone();
        engine.submit_answer(&wrong).unwrap();

        let frame = render(engine.state());
        assert!(frame.contains("Goya  <- wrong"));
        assert!(frame.contains("Picasso  <- answer"));
    }

    #[test]
    fn renders_error_and_final_score() {
        let mut engine = QuizEngine::new(QuizSettings::default());
        engine.start();
        let empty = RawBatch {
            response_code: ResponseCode::RateLimited,
            results: Vec::new(),
        };
        engine.finish_load(engine.generation(), Ok(empty));
        let frame = render(engine.state());
        assert!(frame.starts_with("Something went wrong:"));
        assert!(frame.contains("too many requests"));

        let mut engine = loaded();
        let wrong = engine.current_question().unwrap().answers()[0].clone();
        let correct = wrong.is_correct();
        engine.submit_answer(&wrong).unwrap();
        engine.advance();
        let frame = render(engine.state());
        assert!(frame.contains("Quiz complete!"));
        assert!(frame.contains(&format!("Final score: {} / 1", u8::from(correct))));
    }
}
