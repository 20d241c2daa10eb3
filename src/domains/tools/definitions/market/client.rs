//! Shared HTTP client for the market data APIs.
//!
//! Wraps one pooled `reqwest::Client` together with the server
//! configuration. Requests are sent without a timeout and are never retried.

use std::sync::Arc;

use reqwest::{Response, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, error};

use crate::core::config::Config;
use crate::domains::tools::ToolError;

/// Name used in error messages for the Alpha Vantage API.
pub const ALPHA_VANTAGE: &str = "Alpha Vantage";

/// Name used in error messages for the Financial Modeling Prep API.
pub const FMP: &str = "FMP";

/// HTTP client shared by all market data tools.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl MarketDataClient {
    pub fn new(config: Arc<Config>) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ToolError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a GET request. Only connection-level failures are errors here;
    /// the caller decides what a non-success status means.
    pub async fn get(&self, url: Url, api: &'static str) -> Result<Response, ToolError> {
        // The query string carries the API key, so only the path is logged.
        debug!(api, path = url.path(), "Sending request");

        self.http.get(url).send().await.map_err(|source| {
            error!("{} request failed: {}", api, source);
            ToolError::UpstreamTransport { api, source }
        })
    }
}

/// Parse a response body as JSON, returned as-is.
pub async fn read_json(response: Response, api: &'static str) -> Result<Value, ToolError> {
    response
        .json::<Value>()
        .await
        .map_err(|source| ToolError::UpstreamTransport { api, source })
}

/// Read a response body as text and wrap it in a JSON string.
pub async fn read_text(response: Response, api: &'static str) -> Result<Value, ToolError> {
    response
        .text()
        .await
        .map(Value::String)
        .map_err(|source| ToolError::UpstreamTransport { api, source })
}

/// Human-readable status text, e.g. "Not Found" for 404.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
