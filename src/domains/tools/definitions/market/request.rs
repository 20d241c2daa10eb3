//! Outbound request builders.
//!
//! Pure functions turning typed tool parameters plus the server
//! configuration into a complete request URL. No I/O happens here.

use reqwest::Url;

use crate::core::config::Config;
use crate::domains::tools::ToolError;

use super::company_fundamentals::Metric;
use super::stock_price::{Interval, StockPriceParams};

const FUNCTION_DAILY: &str = "TIME_SERIES_DAILY";
const FUNCTION_INTRADAY: &str = "TIME_SERIES_INTRADAY";

/// Build the Alpha Vantage time series URL.
///
/// `interval = daily` selects the daily series and sends no `interval`
/// parameter; any other (or absent) interval selects the intraday series
/// with the resolved interval, `5min` by default.
pub fn stock_price_url(params: &StockPriceParams, config: &Config) -> Result<Url, ToolError> {
    let mut query: Vec<(&str, &str)> = vec![
        ("apikey", config.credentials.alpha_vantage_api_key.as_str()),
        ("symbol", params.symbol.as_str()),
    ];

    match params.interval.unwrap_or_default() {
        Interval::Daily => query.push(("function", FUNCTION_DAILY)),
        interval => {
            query.push(("function", FUNCTION_INTRADAY));
            query.push(("interval", interval.as_str()));
        }
    }

    if let Some(output_size) = params.output_size {
        query.push(("outputsize", output_size.as_str()));
    }
    if let Some(data_type) = params.data_type {
        query.push(("datatype", data_type.as_str()));
    }

    Url::parse_with_params(&config.endpoints.alpha_vantage_base_url, &query)
        .map_err(|e| ToolError::internal(format!("Invalid Alpha Vantage base URL: {}", e)))
}

/// Build the Financial Modeling Prep URL for one metric, i.e.
/// `{base}/{endpoint}/{symbol}?apikey=...`.
pub fn fundamentals_url(metric: Metric, symbol: &str, config: &Config) -> Result<Url, ToolError> {
    let mut url = Url::parse(&config.endpoints.fmp_base_url)
        .map_err(|e| ToolError::internal(format!("Invalid FMP base URL: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| ToolError::internal("FMP base URL cannot carry a path"))?
        .pop_if_empty()
        .push(metric.endpoint())
        .push(symbol);

    url.query_pairs_mut()
        .append_pair("apikey", &config.credentials.fmp_api_key);

    Ok(url)
}
