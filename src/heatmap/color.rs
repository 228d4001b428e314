//! Color classification for heatmap tiles.

use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// Discrete visual bucket for a heatmap tile.
///
/// Signed buckets apply to `change_percent`; intensity tiers apply to the
/// normalized `[0, 1]` value of the magnitude metrics. Derived per render,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBucket {
    StrongPositive,
    Positive,
    MildPositive,
    MildNegative,
    Negative,
    StrongNegative,
    Hottest,
    Hot,
    Warm,
    Cool,
}

impl ColorBucket {
    /// Stable kebab-case label, usable as a CSS class hook.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongPositive => "strong-positive",
            Self::Positive => "positive",
            Self::MildPositive => "mild-positive",
            Self::MildNegative => "mild-negative",
            Self::Negative => "negative",
            Self::StrongNegative => "strong-negative",
            Self::Hottest => "hottest",
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cool => "cool",
        }
    }
}

/// Classify a value into a color bucket. Pure and total.
///
/// For `change_percent` the input is the raw signed value; for the other
/// metrics it is the normalized `[0, 1]` value. Thresholds are evaluated
/// high to low with strict inequality, so a value sitting exactly on a
/// boundary falls into the lower bucket.
pub fn classify(value: f64, metric: Metric) -> ColorBucket {
    if metric.is_signed() {
        if value > 5.0 {
            ColorBucket::StrongPositive
        } else if value > 2.0 {
            ColorBucket::Positive
        } else if value > 0.0 {
            ColorBucket::MildPositive
        } else if value > -2.0 {
            ColorBucket::MildNegative
        } else if value > -5.0 {
            ColorBucket::Negative
        } else {
            ColorBucket::StrongNegative
        }
    } else if value > 0.8 {
        ColorBucket::Hottest
    } else if value > 0.6 {
        ColorBucket::Hot
    } else if value > 0.4 {
        ColorBucket::Warm
    } else {
        ColorBucket::Cool
    }
}
