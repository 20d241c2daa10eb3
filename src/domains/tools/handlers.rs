//! Tool handlers module.
//!
//! A handler receives the raw argument object of a `tools/call` request and
//! produces a JSON value or a [`ToolError`]. Concrete tools implement the
//! typed [`TypedTool`] trait instead; [`TypedHandler`] adapts them by decoding
//! the argument object into the tool's parameter struct first, so handlers
//! never see an untyped argument bag.

use async_trait::async_trait;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::ToolError;

/// Object-safe handler stored in a tool definition.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given arguments.
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError>;
}

/// A tool with strongly typed parameters.
#[async_trait]
pub trait TypedTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Parameters decoded from the call arguments. Their JSON schema is the
    /// advertised input schema of the tool.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Semantic checks serde cannot express (e.g. non-empty strings).
    fn validate(_params: &Self::Params) -> Result<(), ToolError> {
        Ok(())
    }

    /// Execute the tool logic.
    async fn execute(&self, params: Self::Params) -> Result<Value, ToolError>;
}

/// Adapter turning a [`TypedTool`] into an object-safe [`ToolHandler`].
pub struct TypedHandler<T>(pub T);

#[async_trait]
impl<T: TypedTool> ToolHandler for TypedHandler<T> {
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError> {
        let params: T::Params = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        T::validate(&params)?;

        debug!(tool = T::NAME, "Arguments decoded");
        self.0.execute(params).await
    }
}

/// Reject blank ticker symbols before any request is built.
pub fn require_symbol(symbol: &str) -> Result<(), ToolError> {
    if symbol.trim().is_empty() {
        return Err(ToolError::invalid_arguments("symbol must not be empty"));
    }
    Ok(())
}
