//! Wire-shape records returned by the trivia API.
//!
//! These are transient: they are decoded from the response body, handed to the
//! transformer, and dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code carried in every batch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ResponseCode {
    Success,
    NoResults,
    InvalidParameter,
    TokenNotFound,
    TokenEmpty,
    RateLimited,
    Other(i64),
}

impl ResponseCode {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == ResponseCode::Success
    }

    #[must_use]
    pub fn code(self) -> i64 {
        i64::from(self)
    }

    /// Human-readable explanation of the code.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            ResponseCode::Success => "success",
            ResponseCode::NoResults => "not enough questions available for this query",
            ResponseCode::InvalidParameter => "the request contained an invalid parameter",
            ResponseCode::TokenNotFound => "session token not found",
            ResponseCode::TokenEmpty => "session token has returned all available questions",
            ResponseCode::RateLimited => "too many requests, wait a few seconds",
            ResponseCode::Other(_) => "unexpected response code",
        }
    }
}

impl From<i64> for ResponseCode {
    fn from(code: i64) -> Self {
        match code {
            0 => ResponseCode::Success,
            1 => ResponseCode::NoResults,
            2 => ResponseCode::InvalidParameter,
            3 => ResponseCode::TokenNotFound,
            4 => ResponseCode::TokenEmpty,
            5 => ResponseCode::RateLimited,
            other => ResponseCode::Other(other),
        }
    }
}

impl From<ResponseCode> for i64 {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::Success => 0,
            ResponseCode::NoResults => 1,
            ResponseCode::InvalidParameter => 2,
            ResponseCode::TokenNotFound => 3,
            ResponseCode::TokenEmpty => 4,
            ResponseCode::RateLimited => 5,
            ResponseCode::Other(other) => other,
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.describe(), self.code())
    }
}

/// One question exactly as the API sends it, entities still escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// A full batch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBatch {
    pub response_code: ResponseCode,
    pub results: Vec<RawQuestion>,
}
