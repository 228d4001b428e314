//! Upstream data access.
//!
//! The `MarketDataProvider` trait abstracts the three collaborators the
//! dashboard consumes (stock feed, template catalog, screener backend);
//! `HttpProvider` is the production adapter.

pub mod http;
pub mod provider;

pub use http::HttpProvider;
pub use provider::{MarketDataProvider, StockBatch, TemplatesEnvelope};
