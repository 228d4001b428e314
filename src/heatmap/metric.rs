//! Heatmap metric selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The stock field used to color and label the heatmap.
///
/// Every normalization, classification and formatting rule is keyed on the
/// metric; behavior is purely functional per (metric, value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Signed daily change percentage, already comparable across stocks
    ChangePercent,
    /// Traded share count, compared relative to the current batch
    Volume,
    /// Market capitalization, compared relative to the current batch
    MarketCap,
}

impl Metric {
    /// Whether this metric is compared on its raw signed scale rather than
    /// rescaled against the rest of the batch.
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::ChangePercent)
    }

    /// Wire/field name of the metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChangePercent => "change_percent",
            Self::Volume => "volume",
            Self::MarketCap => "market_cap",
        }
    }

    /// All metrics, in display order.
    pub fn all() -> &'static [Metric] {
        &[Self::ChangePercent, Self::Volume, Self::MarketCap]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "change_percent" => Ok(Self::ChangePercent),
            "volume" => Ok(Self::Volume),
            "market_cap" => Ok(Self::MarketCap),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}
