use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use quiz_core::model::RawBatch;

use crate::config::{QuestionKind, TriviaConfig};
use crate::error::TriviaError;

/// Anything that can produce a raw question batch.
///
/// `TriviaClient` is the production implementation; tests plug in fakes.
#[async_trait]
pub trait TriviaSource: Send + Sync {
    /// Fetch one batch of `amount` questions. Called at most once per load and
    /// never retried by the caller automatically.
    async fn fetch_batch(&self, amount: u32) -> Result<RawBatch, TriviaError>;
}

/// HTTP client for the public trivia API.
#[derive(Clone)]
pub struct TriviaClient {
    client: Client,
    config: TriviaConfig,
}

impl TriviaClient {
    /// # Errors
    ///
    /// See [`TriviaClient::new`].
    pub fn from_env() -> Result<Self, TriviaError> {
        Self::new(TriviaConfig::from_env())
    }

    /// Build a client that applies `config.timeout` to every request.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError::Network` if the HTTP client cannot be set up
    /// (for example when no TLS backend can be initialized).
    pub fn new(config: TriviaConfig) -> Result<Self, TriviaError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &TriviaConfig {
        &self.config
    }

    /// Build `{base_url}?amount={amount}&type={kind}`.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError::InvalidEndpoint` if the base URL does not parse.
    pub fn request_url(&self, amount: u32, kind: QuestionKind) -> Result<Url, TriviaError> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("amount", &amount.to_string())
            .append_pair("type", kind.as_str());
        Ok(url)
    }

    /// Fetch and decode one batch.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError::Network`/`HttpStatus` on transport failures and
    /// `TriviaError::Decode` when the body is not a valid batch.
    pub async fn fetch(&self, amount: u32, kind: QuestionKind) -> Result<RawBatch, TriviaError> {
        let url = self.request_url(amount, kind)?;
        tracing::debug!(%url, "requesting trivia batch");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TriviaError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        decode_batch(&body)
    }
}

#[async_trait]
impl TriviaSource for TriviaClient {
    async fn fetch_batch(&self, amount: u32) -> Result<RawBatch, TriviaError> {
        self.fetch(amount, self.config.kind).await
    }
}

/// Decode a response body. A body that does not match the batch shape fails
/// as a whole.
///
/// # Errors
///
/// Returns `TriviaError::Decode` for malformed or empty bodies.
pub fn decode_batch(body: &[u8]) -> Result<RawBatch, TriviaError> {
    Ok(serde_json::from_slice(body)?)
}
