//! Market heatmap module.
//!
//! Transforms a batch of stock records plus a selected metric into renderable
//! heatmap cells: a comparable scalar, a discrete color bucket and a display
//! label per record.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌─────────────────┐
//! │ StockRecord  │──▶│ MetricBounds  │──▶│ normalize       │──▶ cell.normalized
//! │ batch        │   │ (one pre-pass)│   │ classify        │──▶ cell.bucket
//! └──────────────┘   └───────────────┘   │ format_value    │──▶ cell.label
//!                                        └─────────────────┘
//! ```
//!
//! Bounds are computed once per batch, then every record is an O(1) lookup.
//! All three transforms are pure and total; malformed numeric fields flow
//! through as zero rather than failing the render.

pub mod color;
pub mod format;
pub mod metric;
pub mod normalize;

pub use color::{classify, ColorBucket};
pub use format::format_value;
pub use metric::Metric;
pub use normalize::{coerce_numeric, coerce_or_zero, normalize, MetricBounds};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Stock Record
// ============================================================================

/// One instrument as delivered by the upstream feed.
///
/// The numeric fields stay raw JSON because feeds deliver missing and
/// non-numeric entries; the pipeline coerces them per call instead of
/// rejecting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Instrument identifier (e.g. "AAPL")
    pub symbol: String,
    /// Signed daily change percentage
    #[serde(default)]
    pub change_percent: Value,
    /// Traded share count
    #[serde(default)]
    pub volume: Value,
    /// Market capitalization
    #[serde(default)]
    pub market_cap: Value,
}

impl StockRecord {
    /// Raw field value for a metric.
    pub fn raw_value(&self, metric: Metric) -> &Value {
        match metric {
            Metric::ChangePercent => &self.change_percent,
            Metric::Volume => &self.volume,
            Metric::MarketCap => &self.market_cap,
        }
    }
}

// ============================================================================
// Heatmap View
// ============================================================================

/// One renderable tile of the heatmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Instrument identifier
    pub symbol: String,
    /// Comparable scalar for the selected metric
    pub normalized: f64,
    /// Discrete color bucket
    pub bucket: ColorBucket,
    /// Display label (e.g. "+3.46%", "2.5M", "$1.2B")
    pub label: String,
}

/// A fully derived heatmap for one batch and one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapView {
    /// Metric the view was built for
    pub metric: Metric,
    /// One cell per input record, input order preserved
    pub cells: Vec<HeatmapCell>,
    /// When the view was derived
    pub built_at: DateTime<Utc>,
}

impl HeatmapView {
    /// Build the heatmap for a batch.
    ///
    /// Computes the batch bounds for the metric once, then derives
    /// (normalized, bucket, label) per record. Classification takes the raw
    /// signed value for `change_percent` and the normalized value otherwise,
    /// so cells of one view are always mutually comparable.
    pub fn build(records: &[StockRecord], metric: Metric) -> Self {
        let bounds = MetricBounds::from_values(records.iter().map(|r| r.raw_value(metric)));

        let cells = records
            .iter()
            .map(|record| {
                let raw = record.raw_value(metric);
                let normalized = normalize(raw, metric, &bounds);
                HeatmapCell {
                    symbol: record.symbol.clone(),
                    normalized,
                    bucket: classify(normalized, metric),
                    label: format_value(raw, metric),
                }
            })
            .collect();

        Self {
            metric,
            cells,
            built_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(symbol: &str, change: Value, volume: Value, cap: Value) -> StockRecord {
        StockRecord {
            symbol: symbol.to_string(),
            change_percent: change,
            volume,
            market_cap: cap,
        }
    }

    fn sample_batch() -> Vec<StockRecord> {
        vec![
            record("AAPL", json!(6.1), json!(2_500_000), json!(3_000_000_000i64)),
            record("MSFT", json!(-0.5), json!(1_000_000), json!(2_000_000_000i64)),
            record("NVDA", json!("n/a"), json!(4_000_000), json!(1_000_000_000i64)),
        ]
    }

    #[test]
    fn test_change_percent_view() {
        let view = HeatmapView::build(&sample_batch(), Metric::ChangePercent);
        assert_eq!(view.cells.len(), 3);

        let aapl = &view.cells[0];
        assert_eq!(aapl.normalized, 6.1);
        assert_eq!(aapl.bucket, ColorBucket::StrongPositive);
        assert_eq!(aapl.label, "+6.10%");

        let msft = &view.cells[1];
        assert_eq!(msft.bucket, ColorBucket::MildNegative);
        assert_eq!(msft.label, "-0.50%");

        // Non-numeric change coerces to zero, which is mild-negative
        let nvda = &view.cells[2];
        assert_eq!(nvda.normalized, 0.0);
        assert_eq!(nvda.bucket, ColorBucket::MildNegative);
        assert_eq!(nvda.label, "+0.00%");
    }

    #[test]
    fn test_volume_view_uses_batch_bounds() {
        let view = HeatmapView::build(&sample_batch(), Metric::Volume);
        // min 1.0M, max 4.0M
        assert_eq!(view.cells[0].normalized, 0.5);
        assert_eq!(view.cells[1].normalized, 0.0);
        assert_eq!(view.cells[2].normalized, 1.0);
        assert_eq!(view.cells[2].bucket, ColorBucket::Hottest);
        assert_eq!(view.cells[0].label, "2.5M");
    }

    #[test]
    fn test_single_record_batch_is_cool() {
        let batch = vec![record(
            "AAPL",
            json!(1.0),
            json!(2_000_000),
            json!(1_000_000_000i64),
        )];
        let view = HeatmapView::build(&batch, Metric::MarketCap);
        assert_eq!(view.cells[0].normalized, 0.0);
        assert_eq!(view.cells[0].bucket, ColorBucket::Cool);
        assert_eq!(view.cells[0].label, "$1.0B");
    }

    #[test]
    fn test_empty_batch() {
        let view = HeatmapView::build(&[], Metric::Volume);
        assert!(view.cells.is_empty());
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: StockRecord = serde_json::from_str(r#"{"symbol": "TSLA"}"#).unwrap();
        assert_eq!(record.symbol, "TSLA");
        assert!(record.change_percent.is_null());

        let view = HeatmapView::build(&[record], Metric::ChangePercent);
        assert_eq!(view.cells[0].label, "+0.00%");
    }
}
