//! HTTP client for loading player records.
//!
//! The dashboard loads its dataset with a single GET against the stats API
//! at startup. There is no retry, no cache, and no pagination: the response
//! is one JSON array of player records.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::models::PlayerRecord;

/// Errors that can occur while loading player records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the player client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint returning the JSON array of player records.
    pub endpoint: Url,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("http://127.0.0.1:8080/api/players")
                .expect("default endpoint is a valid URL"),
            timeout: Duration::from_secs(30),
            user_agent: format!("rift-dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for the stats API.
pub struct PlayerClient {
    client: Client,
    config: ClientConfig,
}

impl PlayerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("rift-dashboard/0.1.0")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// The endpoint this client loads from.
    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }

    /// Fetch the full player record array.
    pub async fn fetch_players(&self) -> Result<Vec<PlayerRecord>, FetchError> {
        info!("Fetching players from {}", self.config.endpoint);
        self.get_json(self.config.endpoint.clone()).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        // A malformed body maps to Json, not a transport error.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
