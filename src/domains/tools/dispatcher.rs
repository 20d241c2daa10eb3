//! Tool call dispatch.
//!
//! The dispatcher is the boundary between the transport and the tools. Every
//! call produces exactly one [`CallToolResult`] envelope: unknown names,
//! argument errors, upstream failures and handler panics all become error
//! envelopes and never reach the caller as `Err` or as an unwinding panic.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;

/// Routes `tools/list` and `tools/call` to the registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// List all tools in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.list()
    }

    /// Call a tool by name. Missing arguments are treated as an empty object.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let Some(tool) = self.registry.find(name) else {
            warn!("Unknown tool requested: {}", name);
            return error_envelope(ToolError::unknown_tool(name).to_string());
        };

        let arguments = arguments.unwrap_or_default();
        let outcome = AssertUnwindSafe(tool.invoke(arguments))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(ToolError::internal(format!(
                    "tool handler panicked: {}",
                    panic_message(panic.as_ref())
                )))
            });

        match outcome {
            Ok(value) => {
                info!("Tool {} succeeded", name);
                success_envelope(&value)
            }
            Err(err) if err.is_invalid_arguments() => {
                warn!("Tool {} rejected arguments: {}", name, err);
                error_envelope(err.to_string())
            }
            Err(err) => {
                error!("Tool {} failed: {}", name, err);
                error_envelope(format!("API error: {}", err))
            }
        }
    }
}

fn success_envelope(value: &Value) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_envelope(format!("API error: {}", e)),
    }
}

fn error_envelope(message: String) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message)])
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definition::ToolDefinition;
    use crate::domains::tools::handlers::ToolHandler;
    use async_trait::async_trait;
    use rmcp::model::RawContent;

    struct FixedHandler(Value);

    #[async_trait]
    impl ToolHandler for FixedHandler {
        async fn call(&self, _arguments: JsonObject) -> Result<Value, ToolError> {
            Ok(self.0.clone())
        }
    }

    struct EchoArgsHandler;

    #[async_trait]
    impl ToolHandler for EchoArgsHandler {
        async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError> {
            Ok(Value::Object(arguments))
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl ToolHandler for FailingHandler {
        async fn call(&self, _arguments: JsonObject) -> Result<Value, ToolError> {
            Err(ToolError::upstream_status("Alpha Vantage", "Service Unavailable"))
        }
    }

    struct RejectingHandler;

    #[async_trait]
    impl ToolHandler for RejectingHandler {
        async fn call(&self, _arguments: JsonObject) -> Result<Value, ToolError> {
            Err(ToolError::invalid_arguments("missing field `symbol`"))
        }
    }

    struct PanickingHandler;

    #[async_trait]
    impl ToolHandler for PanickingHandler {
        async fn call(&self, _arguments: JsonObject) -> Result<Value, ToolError> {
            panic!("boom");
        }
    }

    fn define(name: &'static str, handler: impl ToolHandler + 'static) -> ToolDefinition {
        ToolDefinition::new(name, "test tool", Arc::new(JsonObject::new()), Arc::new(handler))
    }

    fn dispatcher() -> Dispatcher {
        let mut registry = ToolRegistry::new();
        registry
            .register(define(
                "fixed",
                FixedHandler(serde_json::json!({ "b": 1, "a": [true, null] })),
            ))
            .unwrap();
        registry.register(define("echo", EchoArgsHandler)).unwrap();
        registry.register(define("failing", FailingHandler)).unwrap();
        registry.register(define("rejecting", RejectingHandler)).unwrap();
        registry.register(define("panicking", PanickingHandler)).unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    fn text_of(result: &CallToolResult) -> String {
        assert_eq!(result.content.len(), 1, "exactly one content item expected");
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_list_tools_in_registration_order() {
        let dispatcher = dispatcher();
        let names: Vec<_> = dispatcher
            .list_tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names, vec!["fixed", "echo", "failing", "rejecting", "panicking"]);
        assert_eq!(
            serde_json::to_value(dispatcher.list_tools()).unwrap(),
            serde_json::to_value(dispatcher.list_tools()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_envelope() {
        let result = dispatcher().call_tool("weather", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Unknown tool: weather");
    }

    #[tokio::test]
    async fn test_success_is_pretty_printed() {
        let result = dispatcher().call_tool("fixed", None).await;
        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[tokio::test]
    async fn test_missing_arguments_become_empty_object() {
        let result = dispatcher().call_tool("echo", None).await;
        assert_eq!(text_of(&result), "{}");
    }

    #[tokio::test]
    async fn test_arguments_are_forwarded() {
        let args = serde_json::json!({ "symbol": "IBM" })
            .as_object()
            .cloned();
        let result = dispatcher().call_tool("echo", args).await;
        let echoed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(echoed, serde_json::json!({ "symbol": "IBM" }));
    }

    #[tokio::test]
    async fn test_handler_failure_is_api_error() {
        let result = dispatcher().call_tool("failing", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "API error: Alpha Vantage API error: Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_invalid_arguments_envelope() {
        let result = dispatcher().call_tool("rejecting", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Invalid arguments: missing field `symbol`");
    }

    #[tokio::test]
    async fn test_handler_panic_is_contained() {
        let result = dispatcher().call_tool("panicking", None).await;
        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.starts_with("API error: "));
        assert!(text.contains("boom"));
    }

    #[tokio::test]
    async fn test_tool_names_are_case_sensitive() {
        let result = dispatcher().call_tool("FIXED", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Unknown tool: FIXED");
    }

    mod market {
        use super::*;
        use crate::core::config::Config;
        use wiremock::matchers::{method, path, query_param, query_param_is_missing};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn market_dispatcher(server: &MockServer) -> Dispatcher {
            let config = Config::default()
                .with_credentials("AV_KEY", "FMP_KEY")
                .with_endpoints(
                    format!("{}/query", server.uri()),
                    format!("{}/api/v3", server.uri()),
                );
            let registry = ToolRegistry::from_config(Arc::new(config)).unwrap();
            Dispatcher::new(Arc::new(registry))
        }

        fn args(value: Value) -> Option<JsonObject> {
            value.as_object().cloned()
        }

        #[tokio::test]
        async fn test_daily_prices_envelope_is_pretty_upstream_body() {
            let server = MockServer::start().await;
            let body = serde_json::json!({
                "Meta Data": { "2. Symbol": "MSFT" },
                "Time Series (Daily)": { "2024-01-02": { "4. close": "370.87" } }
            });
            Mock::given(method("GET"))
                .and(path("/query"))
                .and(query_param("function", "TIME_SERIES_DAILY"))
                .and(query_param("symbol", "MSFT"))
                .and(query_param("outputsize", "full"))
                .and(query_param("apikey", "AV_KEY"))
                .and(query_param_is_missing("interval"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
                .expect(1)
                .mount(&server)
                .await;

            let result = market_dispatcher(&server)
                .call_tool(
                    "stock_price",
                    args(serde_json::json!({
                        "symbol": "MSFT",
                        "interval": "daily",
                        "outputSize": "full"
                    })),
                )
                .await;

            assert_ne!(result.is_error, Some(true));
            assert_eq!(text_of(&result), serde_json::to_string_pretty(&body).unwrap());
        }

        #[tokio::test]
        async fn test_stock_price_upstream_failure_envelope() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/query"))
                .respond_with(ResponseTemplate::new(503))
                .mount(&server)
                .await;

            let result = market_dispatcher(&server)
                .call_tool("stock_price", args(serde_json::json!({ "symbol": "IBM" })))
                .await;

            assert_eq!(result.is_error, Some(true));
            assert_eq!(
                text_of(&result),
                "API error: Alpha Vantage API error: Service Unavailable"
            );
        }

        #[tokio::test]
        async fn test_fundamentals_abort_envelope() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/v3/profile/AAPL"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/api/v3/income-statement/AAPL"))
                .respond_with(ResponseTemplate::new(403))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/api/v3/balance-sheet-statement/AAPL"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
                .expect(0)
                .mount(&server)
                .await;

            let result = market_dispatcher(&server)
                .call_tool(
                    "company_fundamentals",
                    args(serde_json::json!({
                        "symbol": "AAPL",
                        "metrics": ["overview", "income", "balance"]
                    })),
                )
                .await;

            assert_eq!(result.is_error, Some(true));
            assert_eq!(
                text_of(&result),
                "API error: FMP API error for income: Forbidden"
            );
        }

        #[tokio::test]
        async fn test_fundamentals_skips_non_string_metrics() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/v3/profile/AAPL"))
                .and(query_param("apikey", "FMP_KEY"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1])))
                .expect(1)
                .mount(&server)
                .await;

            let result = market_dispatcher(&server)
                .call_tool(
                    "company_fundamentals",
                    args(serde_json::json!({
                        "symbol": "AAPL",
                        "metrics": ["overview", 5, null]
                    })),
                )
                .await;

            assert_ne!(result.is_error, Some(true));
            let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
            assert_eq!(body, serde_json::json!({ "overview": [1] }));
        }

        #[tokio::test]
        async fn test_missing_symbol_makes_no_request() {
            let server = MockServer::start().await;

            let result = market_dispatcher(&server)
                .call_tool("stock_price", args(serde_json::json!({ "interval": "daily" })))
                .await;

            assert_eq!(result.is_error, Some(true));
            assert!(text_of(&result).starts_with("Invalid arguments:"));
            assert!(server.received_requests().await.unwrap_or_default().is_empty());
        }
    }
}
