//! Quote of the day.
//!
//! Fetches a short motivational line at startup. Any failure (network error,
//! timeout, non-success status, unexpected body) yields the configured
//! fallback text; nothing here can affect task or reminder state.

use crate::config::QuoteConfig;
use crate::error::{Result, TrackerError};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    content: Option<String>,
}

/// HTTP client for the quote service.
pub struct QuoteClient {
    url: String,
    fallback: String,
    client: reqwest::Client,
}

impl QuoteClient {
    pub fn new(config: &QuoteConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("cannot build quote HTTP client, using defaults: {e}");
                reqwest::Client::new()
            });
        Self {
            url: config.url.clone(),
            fallback: config.fallback.clone(),
            client,
        }
    }

    /// Fetch a quote, falling back on any failure.
    pub async fn fetch(&self) -> String {
        match self.try_fetch().await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("quote fetch failed, using fallback: {e}");
                self.fallback.clone()
            }
        }
    }

    async fn try_fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| TrackerError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Network(format!("quote service returned {status}")));
        }

        let body: QuoteResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::Network(format!("unreadable quote body: {e}")))?;

        let quote = body
            .content
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| TrackerError::Network("quote body has no content".to_owned()))?;
        debug!("fetched quote of the day");
        Ok(quote)
    }
}

/// Fetch the quote of the day, or the fallback when disabled.
pub async fn quote_of_the_day(config: &QuoteConfig) -> String {
    if !config.enabled {
        return config.fallback.clone();
    }
    QuoteClient::new(config).fetch().await
}
