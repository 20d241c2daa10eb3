//! Declarative tool definitions.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{JsonObject, Tool},
};
use serde_json::Value;

use super::error::ToolError;
use super::handlers::{ToolHandler, TypedHandler, TypedTool};

/// A registered tool: name, description, input schema and handler.
///
/// Definitions are immutable once built; cloning shares the handler.
#[derive(Clone)]
pub struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    input_schema: Arc<JsonObject>,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    /// Build a definition from its parts.
    pub fn new(
        name: &'static str,
        description: &'static str,
        input_schema: Arc<JsonObject>,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name,
            description,
            input_schema,
            handler,
        }
    }

    /// Build a definition for a typed tool. The input schema is derived from
    /// the tool's parameter struct.
    pub fn from_tool<T: TypedTool>(tool: T) -> Self {
        Self::new(
            T::NAME,
            T::DESCRIPTION,
            schema_for_type::<T::Params>().into(),
            Arc::new(TypedHandler(tool)),
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Create a Tool model for this definition (metadata only, no handler).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Run the handler with the given arguments.
    pub async fn invoke(&self, arguments: JsonObject) -> Result<Value, ToolError> {
        self.handler.call(arguments).await
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
