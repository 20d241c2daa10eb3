//! Stock price tool.
//!
//! Fetches intraday or daily time series from Alpha Vantage and returns the
//! upstream JSON body unchanged.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::{TypedTool, require_symbol};

use super::client::{ALPHA_VANTAGE, MarketDataClient, read_json, read_text, status_text};
use super::request::stock_price_url;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Time interval between data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Interval {
    #[serde(rename = "1min")]
    OneMin,
    #[default]
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "15min")]
    FifteenMin,
    #[serde(rename = "30min")]
    ThirtyMin,
    #[serde(rename = "60min")]
    SixtyMin,
    #[serde(rename = "daily")]
    Daily,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneMin => "1min",
            Self::FiveMin => "5min",
            Self::FifteenMin => "15min",
            Self::ThirtyMin => "30min",
            Self::SixtyMin => "60min",
            Self::Daily => "daily",
        }
    }
}

/// Amount of data to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    Compact,
    Full,
}

impl OutputSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

/// Response data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Json,
    Csv,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Parameters for the stock price tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockPriceParams {
    #[schemars(description = "Stock ticker symbol")]
    pub symbol: String,

    #[serde(default)]
    #[schemars(description = "Time interval between data points (default: 5min)")]
    pub interval: Option<Interval>,

    #[serde(default)]
    #[schemars(
        description = "Amount of data to return (compact = last 100 points, full = all data)"
    )]
    pub output_size: Option<OutputSize>,

    #[serde(default)]
    #[schemars(description = "Response data format")]
    pub data_type: Option<DataType>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Stock price tool backed by the Alpha Vantage time series API.
#[derive(Debug, Clone)]
pub struct StockPriceTool {
    client: MarketDataClient,
}

impl StockPriceTool {
    pub fn new(client: MarketDataClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TypedTool for StockPriceTool {
    const NAME: &'static str = "stock_price";

    const DESCRIPTION: &'static str =
        "Get real-time and historical stock price data from Alpha Vantage";

    type Params = StockPriceParams;

    fn validate(params: &StockPriceParams) -> Result<(), ToolError> {
        require_symbol(&params.symbol)
    }

    #[instrument(skip_all, fields(symbol = %params.symbol))]
    async fn execute(&self, params: StockPriceParams) -> Result<Value, ToolError> {
        let interval = params.interval.unwrap_or_default();
        info!("Fetching {} prices for {}", interval.as_str(), params.symbol);

        let url = stock_price_url(&params, self.client.config())?;
        let response = self.client.get(url, ALPHA_VANTAGE).await?;

        let status = response.status();
        if !status.is_success() {
            error!("Alpha Vantage returned HTTP {}", status);
            return Err(ToolError::upstream_status(ALPHA_VANTAGE, status_text(status)));
        }

        match params.data_type {
            Some(DataType::Csv) => read_text(response, ALPHA_VANTAGE).await,
            _ => read_json(response, ALPHA_VANTAGE).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> StockPriceTool {
        let config = Config::default()
            .with_credentials("AV_KEY", "FMP_KEY")
            .with_endpoints(format!("{}/query", server.uri()), format!("{}/api/v3", server.uri()));
        StockPriceTool::new(MarketDataClient::new(Arc::new(config)).unwrap())
    }

    fn params(value: Value) -> StockPriceParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_params_decoding() {
        let p = params(serde_json::json!({
            "symbol": "MSFT",
            "interval": "daily",
            "outputSize": "full",
            "dataType": "json"
        }));
        assert_eq!(p.interval, Some(Interval::Daily));
        assert_eq!(p.output_size, Some(OutputSize::Full));
        assert_eq!(p.data_type, Some(DataType::Json));

        let p = params(serde_json::json!({ "symbol": "IBM" }));
        assert_eq!(p.interval, None);
        assert_eq!(p.interval.unwrap_or_default(), Interval::FiveMin);
    }

    #[test]
    fn test_params_reject_unknown_interval() {
        let result: Result<StockPriceParams, _> =
            serde_json::from_value(serde_json::json!({ "symbol": "IBM", "interval": "2min" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_symbol_rejected() {
        let p = params(serde_json::json!({ "symbol": "" }));
        assert!(StockPriceTool::validate(&p).unwrap_err().is_invalid_arguments());
    }

    #[tokio::test]
    async fn test_default_interval_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("apikey", "AV_KEY"))
            .and(query_param("symbol", "IBM"))
            .and(query_param("function", "TIME_SERIES_INTRADAY"))
            .and(query_param("interval", "5min"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(params(serde_json::json!({ "symbol": "IBM" })))
            .await
            .unwrap();
        assert_eq!(result, serde_json::json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_daily_full_request_returns_body_verbatim() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "Meta Data": { "2. Symbol": "MSFT" },
            "Time Series (Daily)": { "2024-01-02": { "4. close": "370.8700" } }
        });
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "TIME_SERIES_DAILY"))
            .and(query_param("symbol", "MSFT"))
            .and(query_param("outputsize", "full"))
            .and(query_param_is_missing("interval"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(params(serde_json::json!({
                "symbol": "MSFT",
                "interval": "daily",
                "outputSize": "full"
            })))
            .await
            .unwrap();
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = tool_for(&server)
            .execute(params(serde_json::json!({ "symbol": "IBM" })))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Alpha Vantage API error: Service Unavailable");
    }

    #[tokio::test]
    async fn test_malformed_json_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = tool_for(&server)
            .execute(params(serde_json::json!({ "symbol": "IBM" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UpstreamTransport { api: ALPHA_VANTAGE, .. }));
    }

    #[tokio::test]
    async fn test_csv_body_returned_as_text() {
        let server = MockServer::start().await;
        let csv = "timestamp,open\n2024-01-02,370.1\n";
        Mock::given(method("GET"))
            .and(query_param("datatype", "csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(csv))
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(params(serde_json::json!({ "symbol": "IBM", "dataType": "csv" })))
            .await
            .unwrap();
        assert_eq!(result, Value::String(csv.to_string()));
    }
}
