/// One line typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// 1-based answer slot.
    Answer(usize),
    Restart,
    Quit,
    Unknown,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Ok(slot) = line.parse::<usize>() {
            return if slot == 0 {
                Input::Unknown
            } else {
                Input::Answer(slot)
            };
        }
        match line.to_ascii_lowercase().as_str() {
            "r" | "restart" | "retry" => Input::Restart,
            "q" | "quit" | "exit" => Input::Quit,
            _ => Input::Unknown,
        }
    }
}

pub const HELP: &str = "Type an answer number, r to restart, q to quit.";
