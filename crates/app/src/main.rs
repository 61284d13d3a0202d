mod input;
mod render;

use std::sync::Arc;

use services::{QuizEngine, QuizRuntime, QuizSettings, TriviaClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::input::{HELP, Input};
use crate::render::render;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = TriviaClient::from_env()?;
    let settings = QuizSettings::from_env();
    tracing::info!(
        endpoint = %client.config().base_url,
        batch_size = settings.batch_size(),
        "starting quiz"
    );

    let handle = QuizRuntime::spawn(QuizEngine::new(settings), Arc::new(client));
    let mut states = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    handle.start().await?;

    let mut last_frame = String::new();
    loop {
        let frame = render(&states.borrow_and_update());
        if frame != last_frame {
            print!("{frame}");
            last_frame = frame;
        }

        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Input::parse(&line) {
                    Input::Answer(slot) => {
                        let snapshot = handle.snapshot();
                        let answer = snapshot
                            .current_question()
                            .ok()
                            .and_then(|question| question.answers().get(slot - 1));
                        match answer {
                            Some(answer) => handle.submit_answer(answer).await?,
                            None => println!("No answer {slot} here. {HELP}"),
                        }
                    }
                    Input::Restart => handle.reset().await?,
                    Input::Quit => break,
                    Input::Unknown => println!("{HELP}"),
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
