//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.
//! The service stops when the client closes stdin or when the process
//! receives Ctrl-C.

use rmcp::ServiceExt;
use tracing::{info, warn};

use super::{TransportError, TransportResult, shutdown_signal};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let cancel = service.cancellation_token();
        let signal_task = tokio::spawn(async move {
            shutdown_signal().await;
            warn!("Shutdown signal received, closing STDIO transport");
            cancel.cancel();
        });

        let quit_reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;
        signal_task.abort();

        info!("STDIO transport finished: {:?}", quit_reason);
        Ok(())
    }
}
