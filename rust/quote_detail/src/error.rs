// src/error.rs

use std::sync::PoisonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Quote service answered {status} for {symbol}")]
    Status { symbol: String, status: reqwest::StatusCode },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Field {field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Ticker symbol must not be empty")]
    EmptySymbol,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Catalog entry rejected: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Quote cache lock poisoned: {0}")]
    CachePoisoned(String),
}

impl<T> From<PoisonError<T>> for QuoteError {
    fn from(err: PoisonError<T>) -> Self {
        QuoteError::CachePoisoned(err.to_string())
    }
}
