//! Configuration management for the MCP server.
//!
//! Configuration is assembled once at start-up from defaults, an optional
//! `.env` file and environment variables, then shared read-only (behind an
//! `Arc`) with every tool that talks to an external API.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Environment variable holding the Alpha Vantage API key.
pub const ALPHA_VANTAGE_API_KEY_VAR: &str = "ALPHA_VANTAGE_API_KEY";

/// Environment variable holding the Financial Modeling Prep API key.
pub const FMP_API_KEY_VAR: &str = "FMP_API_KEY";

/// Default Alpha Vantage query endpoint.
pub const DEFAULT_ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Default Financial Modeling Prep API root.
pub const DEFAULT_FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials.
    pub credentials: CredentialsConfig,

    /// External API base URLs.
    pub endpoints: EndpointsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Credentials for the external market data APIs.
///
/// Both keys are forwarded verbatim as the `apikey` query parameter.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Alpha Vantage key, used by `stock_price`.
    pub alpha_vantage_api_key: String,

    /// Financial Modeling Prep key, used by `company_fundamentals`.
    pub fmp_api_key: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("alpha_vantage_api_key", &redact(&self.alpha_vantage_api_key))
            .field("fmp_api_key", &redact(&self.fmp_api_key))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "[UNSET]" } else { "[REDACTED]" }
}

/// Base URLs of the external APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Alpha Vantage query endpoint.
    pub alpha_vantage_base_url: String,

    /// Financial Modeling Prep API root; metric paths are appended to it.
    pub fmp_base_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_base_url: DEFAULT_ALPHA_VANTAGE_BASE_URL.to_string(),
            fmp_base_url: DEFAULT_FMP_BASE_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "financial-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values and no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Both `ALPHA_VANTAGE_API_KEY` and `FMP_API_KEY` are required; a missing
    /// or empty key is a configuration error and the server must not start.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        config.credentials = CredentialsConfig {
            alpha_vantage_api_key: required_var(ALPHA_VANTAGE_API_KEY_VAR)?,
            fmp_api_key: required_var(FMP_API_KEY_VAR)?,
        };

        if let Ok(url) = std::env::var("ALPHA_VANTAGE_BASE_URL") {
            config.endpoints.alpha_vantage_base_url = url;
        }

        if let Ok(url) = std::env::var("FMP_BASE_URL") {
            config.endpoints.fmp_base_url = url;
        }

        Ok(config)
    }

    /// Builder-style helper to set both API keys.
    pub fn with_credentials(
        mut self,
        alpha_vantage_api_key: impl Into<String>,
        fmp_api_key: impl Into<String>,
    ) -> Self {
        self.credentials = CredentialsConfig {
            alpha_vantage_api_key: alpha_vantage_api_key.into(),
            fmp_api_key: fmp_api_key.into(),
        };
        self
    }

    /// Builder-style helper to point the tools at different API hosts.
    pub fn with_endpoints(
        mut self,
        alpha_vantage_base_url: impl Into<String>,
        fmp_base_url: impl Into<String>,
    ) -> Self {
        self.endpoints = EndpointsConfig {
            alpha_vantage_base_url: alpha_vantage_base_url.into(),
            fmp_base_url: fmp_base_url.into(),
        };
        self
    }
}

impl EndpointsConfig {
    /// Base URLs that differ from the public API hosts, as `(api, url)`.
    pub fn overrides(&self) -> Vec<(&'static str, &str)> {
        let mut overrides = Vec::new();
        if self.alpha_vantage_base_url != DEFAULT_ALPHA_VANTAGE_BASE_URL {
            overrides.push(("Alpha Vantage", self.alpha_vantage_base_url.as_str()));
        }
        if self.fmp_base_url != DEFAULT_FMP_BASE_URL {
            overrides.push(("FMP", self.fmp_base_url.as_str()));
        }
        overrides
    }
}

fn required_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config(format!(
            "{} environment variable is required",
            name
        ))),
    }
}
