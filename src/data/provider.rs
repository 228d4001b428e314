//! Data provider abstraction.
//!
//! Defines the `MarketDataProvider` trait covering the three upstream
//! collaborators the dashboard depends on: the stock feed, the template
//! catalog and the screener creation backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::heatmap::StockRecord;
use crate::templates::{ScreenerDraft, Template};

// ============================================================================
// Stock Batch
// ============================================================================

/// A retrieved batch of stock records.
///
/// `success == false` marks a degraded fetch that is reportable but not
/// fatal: whatever records arrived still render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockBatch {
    /// Whether the upstream reported the fetch as successful
    pub success: bool,
    /// Records delivered, possibly partial on a degraded fetch
    #[serde(default)]
    pub data: Vec<StockRecord>,
    /// When the batch was retrieved
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl StockBatch {
    pub fn ok(data: Vec<StockRecord>) -> Self {
        Self {
            success: true,
            data,
            fetched_at: Utc::now(),
        }
    }

    pub fn degraded(data: Vec<StockRecord>) -> Self {
        Self {
            success: false,
            data,
            fetched_at: Utc::now(),
        }
    }
}

// ============================================================================
// Templates Envelope
// ============================================================================

/// Lenient decoding for the template catalog response.
///
/// Upstreams serve either a bare array or a `{"data": [...]}` wrapper;
/// anything else normalizes to an empty catalog.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TemplatesEnvelope {
    Wrapped { data: Vec<Template> },
    Bare(Vec<Template>),
    Other(Value),
}

impl TemplatesEnvelope {
    /// Normalize to a template sequence.
    pub fn into_vec(self) -> Vec<Template> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(templates) => templates,
            Self::Other(_) => Vec::new(),
        }
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Upstream collaborator contract for the dashboard.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch up to `limit` stock records for the heatmap.
    async fn fetch_stocks(&self, limit: usize) -> Result<StockBatch>;

    /// Fetch the screener template catalog.
    async fn fetch_templates(&self) -> Result<Vec<Template>>;

    /// Submit a screener creation draft. Only success/failure is observed.
    async fn create_screener(&self, draft: &ScreenerDraft) -> Result<()>;
}
