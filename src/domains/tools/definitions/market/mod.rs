//! Market data tools module.
//!
//! - `stock_price`: intraday and daily price series from Alpha Vantage
//! - `company_fundamentals`: profile, statements and ratios from Financial
//!   Modeling Prep
//!
//! `request` holds the pure URL builders, `client` the shared HTTP client.

pub mod client;
pub mod company_fundamentals;
pub mod request;
pub mod stock_price;

pub use client::MarketDataClient;
pub use company_fundamentals::{CompanyFundamentalsParams, CompanyFundamentalsTool, Metric};
pub use stock_price::{DataType, Interval, OutputSize, StockPriceParams, StockPriceTool};
