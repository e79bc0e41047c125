// src/loader.rs

use log::debug;
use reqwest::Client;
use std::future::Future;

use crate::config::Config;
use crate::error::QuoteError;
use crate::models::QuotePayload;

/// Source of quote payloads for a symbol.
pub trait QuoteService: Send + Sync {
    fn fetch(&self, symbol: &str) -> impl Future<Output = Result<QuotePayload, QuoteError>> + Send;
}

/// Talks to the quote service over `GET {base_url}/stocks/{symbol}`.
#[derive(Debug, Clone)]
pub struct HttpQuoteService {
    client: Client,
    base_url: String,
}

impl HttpQuoteService {
    pub fn new(config: &Config) -> Result<Self, QuoteError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        HttpQuoteService {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, symbol: &str) -> String {
        format!("{}/stocks/{}", self.base_url, symbol)
    }
}

impl QuoteService for HttpQuoteService {
    async fn fetch(&self, symbol: &str) -> Result<QuotePayload, QuoteError> {
        let url = self.url_for(symbol);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Status {
                symbol: symbol.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
