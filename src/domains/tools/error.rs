//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while registering or executing tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with the same name was already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// The call arguments could not be decoded into the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An upstream API answered with a non-success status.
    #[error("{api} API error: {status}")]
    UpstreamStatus { api: &'static str, status: String },

    /// An upstream API answered with a non-success status for one metric
    /// of a multi-request call.
    #[error("{api} API error for {metric}: {status}")]
    UpstreamMetricStatus {
        api: &'static str,
        metric: &'static str,
        status: String,
    },

    /// The request could not be sent or the body could not be read/parsed.
    #[error("{api} request failed: {source}")]
    UpstreamTransport {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new upstream status error.
    pub fn upstream_status(api: &'static str, status: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            api,
            status: status.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was caused by the caller's arguments rather than
    /// by the upstream API or the server.
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::InvalidArguments(_))
    }
}
