//! Financial MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing market
//! data tools backed by external HTTP APIs:
//!
//! - `stock_price`: intraday and daily time series from Alpha Vantage
//! - `company_fundamentals`: company profile, financial statements and
//!   ratios from Financial Modeling Prep
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tool definitions, the tool registry and the call dispatcher
//!
//! # Example
//!
//! ```rust,no_run
//! use financial_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
