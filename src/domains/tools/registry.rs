//! Tool Registry - central registration and lookup for all tools.
//!
//! This module provides:
//! - An ordered registry of all available tools
//! - Lookup by exact tool name
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::Tool;
use tracing::info;

use crate::core::config::Config;

use super::definition::ToolDefinition;
use super::definitions::{CompanyFundamentalsTool, MarketDataClient, StockPriceTool};
use super::error::ToolError;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the ordered, read-only set of tools the server exposes.
///
/// Tools are listed in registration order. Names are unique; lookups are an
/// exact, case-sensitive comparison. A linear scan is used since the
/// registry holds only a handful of tools.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry with every market data tool, sharing one HTTP
    /// client configured from `config`.
    pub fn from_config(config: Arc<Config>) -> Result<Self, ToolError> {
        let client = MarketDataClient::new(config)?;

        let mut registry = Self::new();
        registry.register(ToolDefinition::from_tool(StockPriceTool::new(client.clone())))?;
        registry.register(ToolDefinition::from_tool(CompanyFundamentalsTool::new(client)))?;

        info!("Registered tools: {:?}", registry.tool_names());
        Ok(registry)
    }

    /// Add a tool. Fails if a tool with the same name is already registered.
    pub fn register(&mut self, tool: ToolDefinition) -> Result<(), ToolError> {
        if self.find(tool.name()).is_some() {
            return Err(ToolError::DuplicateTool(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(ToolDefinition::name).collect()
    }

    /// Get all tools as Tool models (metadata), in registration order.
    pub fn list(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::to_tool).collect()
    }

    /// Find a tool by its exact name.
    pub fn find(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
