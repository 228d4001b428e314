//! Metric normalization.
//!
//! Converts raw field values into comparable scalars:
//! - `change_percent` is already comparable and passes through unchanged;
//! - `volume` / `market_cap` are rescaled to `[0, 1]` against the min/max of
//!   the current batch.
//!
//! Bounds are computed once per batch (`MetricBounds::from_values`) and then
//! applied per record in O(1). Malformed input never raises: every coercion
//! failure and every degenerate batch collapses to `0.0`.

use serde_json::Value;

use super::metric::Metric;

/// Coerce a raw JSON field into a finite number.
///
/// Upstream feeds mix JSON numbers and numeric strings; anything else
/// (missing, null, bool, structure) has no numeric reading.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Coerce with the zero fallback used throughout the pipeline.
pub fn coerce_or_zero(value: &Value) -> f64 {
    coerce_numeric(value).unwrap_or(0.0)
}

// ============================================================================
// Batch Bounds
// ============================================================================

/// Min/max of one metric across a whole batch.
///
/// Built once per rendering pass; every record in that pass must be
/// normalized against the same bounds so results are mutually comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    pub min: f64,
    pub max: f64,
}

impl MetricBounds {
    /// Compute bounds over the coerced values of a batch.
    ///
    /// Non-finite source values coerce to `0.0` before the min/max scan, so
    /// a batch containing them still produces finite bounds.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            let n = coerce_or_zero(value);
            min = min.min(n);
            max = max.max(n);
        }
        Self { min, max }
    }

    /// A batch is degenerate when rescaling against it is meaningless:
    /// empty (infinite bounds) or single-valued (zero span).
    pub fn is_degenerate(&self) -> bool {
        !self.min.is_finite() || !self.max.is_finite() || self.min == self.max
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a raw field value for the given metric.
///
/// - `change_percent`: the coerced signed value unchanged (`0.0` when the
///   value has no finite numeric reading);
/// - `volume` / `market_cap`: linear min-max rescale into `[0, 1]`, or `0.0`
///   for every record of a degenerate batch.
pub fn normalize(value: &Value, metric: Metric, bounds: &MetricBounds) -> f64 {
    if metric.is_signed() {
        return coerce_or_zero(value);
    }

    if bounds.is_degenerate() {
        return 0.0;
    }

    let n = coerce_or_zero(value);
    (n - bounds.min) / (bounds.max - bounds.min)
}
