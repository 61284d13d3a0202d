use std::env;
use std::fmt;
use std::time::Duration;

/// Public trivia API used when `QUIZ_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";

/// The API accepts between 1 and 50 questions per request.
pub const MAX_BATCH_SIZE: u32 = 50;

/// Question format requested from the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuestionKind {
    #[default]
    Multiple,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Multiple => "multiple",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for `TriviaClient`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriviaConfig {
    pub base_url: String,
    pub kind: QuestionKind,
    pub timeout: Duration,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            kind: QuestionKind::Multiple,
            timeout: Duration::from_secs(10),
        }
    }
}

impl TriviaConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("QUIZ_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = env_parse::<u64>("QUIZ_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map_or(defaults.timeout, Duration::from_secs);
        Self {
            base_url,
            kind: defaults.kind,
            timeout,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Session tuning for the quiz engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    batch_size: u32,
    advance_delay: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            advance_delay: Duration::from_millis(2000),
        }
    }
}

impl QuizSettings {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let batch_size = env_parse::<u32>("QUIZ_AMOUNT").unwrap_or(defaults.batch_size);
        let advance_delay = env_parse::<u64>("QUIZ_ADVANCE_DELAY_MS")
            .map_or(defaults.advance_delay, Duration::from_millis);
        Self::default()
            .with_batch_size(batch_size)
            .with_advance_delay(advance_delay)
    }

    /// Sets the questions requested per batch, clamped to `1..=MAX_BATCH_SIZE`.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    #[must_use]
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    #[must_use]
    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
