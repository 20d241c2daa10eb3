//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are named, schema-described operations that forward a call to an
//! external market data API and return its JSON result.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `definition.rs` - The `ToolDefinition` record (name, schema, handler)
//! - `handlers.rs` - Handler traits and typed argument decoding
//! - `registry.rs` - Ordered tool registry with lookup by name
//! - `dispatcher.rs` - Turns every call outcome into a response envelope
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct and a
//!    `TypedTool` implementation
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::from_config`

pub mod definition;
pub mod definitions;
pub mod dispatcher;
mod error;
pub mod handlers;
mod registry;

pub use definition::ToolDefinition;
pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use handlers::{ToolHandler, TypedTool};
pub use registry::ToolRegistry;
