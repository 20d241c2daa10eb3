//! Company fundamentals tool.
//!
//! Fetches one or more fundamental data sets from Financial Modeling Prep,
//! one request per metric, strictly in order. The first failing metric aborts
//! the whole call.

use async_trait::async_trait;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};

use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::{TypedTool, require_symbol};

use super::client::{FMP, MarketDataClient, read_json, status_text};
use super::request::fundamentals_url;

// ============================================================================
// Metrics
// ============================================================================

/// A fundamental data set offered by Financial Modeling Prep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Overview,
    Income,
    Balance,
    Cash,
    Ratios,
}

impl Metric {
    /// Every metric, in the order advertised to clients.
    pub const ALL: [Metric; 5] = [
        Metric::Overview,
        Metric::Income,
        Metric::Balance,
        Metric::Cash,
        Metric::Ratios,
    ];

    /// Look up a metric by its exact (case-sensitive) name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::Overview => "overview",
            Metric::Income => "income",
            Metric::Balance => "balance",
            Metric::Cash => "cash",
            Metric::Ratios => "ratios",
        }
    }

    /// First path segment of the metric's endpoint; the path is
    /// `/{endpoint}/{symbol}`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Metric::Overview => "profile",
            Metric::Income => "income-statement",
            Metric::Balance => "balance-sheet-statement",
            Metric::Cash => "cash-flow-statement",
            Metric::Ratios => "ratios",
        }
    }

    /// All metric names in advertised order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|metric| metric.name()).collect()
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the company fundamentals tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyFundamentalsParams {
    #[schemars(description = "Stock ticker symbol")]
    pub symbol: String,

    // Raw values so unrecognised entries are skipped, not rejected.
    #[serde(default)]
    #[schemars(schema_with = "metrics_schema")]
    pub metrics: Option<Vec<Value>>,
}

fn metrics_schema(_generator: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "array",
        "items": {
            "type": "string",
            "enum": Metric::names()
        },
        "description": "Array of fundamental metrics to retrieve (default: [\"overview\"])"
    })
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Company fundamentals tool backed by the Financial Modeling Prep API.
#[derive(Debug, Clone)]
pub struct CompanyFundamentalsTool {
    client: MarketDataClient,
}

impl CompanyFundamentalsTool {
    pub fn new(client: MarketDataClient) -> Self {
        Self { client }
    }

    /// Fetch a single metric; any non-success status names the metric.
    async fn fetch_metric(&self, metric: Metric, symbol: &str) -> Result<Value, ToolError> {
        let url = fundamentals_url(metric, symbol, self.client.config())?;
        let response = self.client.get(url, FMP).await?;

        let status = response.status();
        if !status.is_success() {
            error!("FMP returned HTTP {} for {}", status, metric.name());
            return Err(ToolError::UpstreamMetricStatus {
                api: FMP,
                metric: metric.name(),
                status: status_text(status),
            });
        }

        read_json(response, FMP).await
    }
}

#[async_trait]
impl TypedTool for CompanyFundamentalsTool {
    const NAME: &'static str = "company_fundamentals";

    const DESCRIPTION: &'static str = "Get company fundamental data from Financial Modeling Prep";

    type Params = CompanyFundamentalsParams;

    fn validate(params: &CompanyFundamentalsParams) -> Result<(), ToolError> {
        require_symbol(&params.symbol)
    }

    #[instrument(skip_all, fields(symbol = %params.symbol))]
    async fn execute(&self, params: CompanyFundamentalsParams) -> Result<Value, ToolError> {
        let requested = params
            .metrics
            .unwrap_or_else(|| vec![Value::from(Metric::Overview.name())]);
        info!("Fetching fundamentals {:?} for {}", requested, params.symbol);

        let mut results = Map::new();
        for entry in &requested {
            let Some(metric) = entry.as_str().and_then(Metric::parse) else {
                warn!("Skipping unknown metric: {}", entry);
                continue;
            };

            let body = self.fetch_metric(metric, &params.symbol).await?;
            results.insert(metric.name().to_string(), body);
        }

        Ok(Value::Object(results))
    }
}
