//! HTTP-backed data provider.
//!
//! Talks to the configured upstream endpoints with reqwest. Degraded stock
//! fetches (non-success upstream flag) are passed through as reportable
//! rather than failing the render; template decoding is lenient per
//! `TemplatesEnvelope`.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DataConfig;
use crate::error::{Error, Result};
use crate::heatmap::StockRecord;
use crate::templates::{ScreenerDraft, Template};

use super::provider::{MarketDataProvider, StockBatch, TemplatesEnvelope};

/// HTTP adapter for the upstream stock/template/screener API.
pub struct HttpProvider {
    client: reqwest::Client,
    config: DataConfig,
}

impl HttpProvider {
    /// Create a provider from data configuration.
    pub fn new(config: DataConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MarketDataProvider for HttpProvider {
    async fn fetch_stocks(&self, limit: usize) -> Result<StockBatch> {
        debug!(url = %self.config.stocks_url, limit, "Fetching stock batch");

        let response = self
            .client
            .get(&self.config.stocks_url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| Error::External(format!("Stock fetch failed: {}", e)))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::External(format!("Stock response decode failed: {}", e)))?;

        // Upstream shape: {"success": bool, "data": [...]}. Render whatever
        // arrived even when the flag (or the status) says degraded.
        let success = status.is_success()
            && body
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(true);
        let data: Vec<StockRecord> = body
            .get("data")
            .cloned()
            .map(|records| serde_json::from_value(records).unwrap_or_default())
            .unwrap_or_default();

        if !success {
            warn!(
                status = %status,
                records = data.len(),
                "Stock fetch degraded, rendering delivered records"
            );
            return Ok(StockBatch::degraded(data));
        }

        Ok(StockBatch::ok(data))
    }

    async fn fetch_templates(&self) -> Result<Vec<Template>> {
        debug!(url = %self.config.templates_url, "Fetching template catalog");

        let envelope: TemplatesEnvelope = self
            .client
            .get(&self.config.templates_url)
            .send()
            .await
            .map_err(|e| Error::External(format!("Template fetch failed: {}", e)))?
            .json()
            .await
            .map_err(|e| Error::External(format!("Template response decode failed: {}", e)))?;

        Ok(envelope.into_vec())
    }

    async fn create_screener(&self, draft: &ScreenerDraft) -> Result<()> {
        debug!(url = %self.config.screeners_url, name = %draft.name, "Creating screener");

        let response = self
            .client
            .post(&self.config.screeners_url)
            .json(draft)
            .send()
            .await
            .map_err(|e| Error::External(format!("Screener creation failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::External(format!(
                "Screener creation rejected: {}",
                response.status()
            )));
        }

        // Response body is intentionally not interpreted.
        Ok(())
    }
}
