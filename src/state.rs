//! Dashboard view state.
//!
//! The heatmap's loading lifecycle is an explicit immutable snapshot plus a
//! pure reducer, so the transformation pipeline stays testable without any
//! rendering shell. Every metric selection issues a fresh fetch sequence
//! number; a resolution carrying a stale number is discarded, so the visible
//! state always reflects the most recent selection even when fetches overtake
//! each other.

use serde::{Deserialize, Serialize};

use crate::data::StockBatch;
use crate::heatmap::Metric;

// ============================================================================
// Load Phase
// ============================================================================

/// Loading lifecycle of a fetched view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum LoadPhase {
    /// A fetch is in flight and nothing has resolved yet
    Loading,
    /// The latest fetch resolved with a batch
    Ready(StockBatch),
    /// The latest fetch failed
    Failed { message: String },
}

impl LoadPhase {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

// ============================================================================
// Heatmap State
// ============================================================================

/// Immutable snapshot of the heatmap view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapState {
    /// Currently selected metric
    pub metric: Metric,
    /// Loading lifecycle for that metric's batch
    pub phase: LoadPhase,
    /// Sequence number of the most recently issued fetch
    pub latest_seq: u64,
}

impl HeatmapState {
    /// Initial snapshot: change-percent selected, nothing fetched yet.
    pub fn initial() -> Self {
        Self {
            metric: Metric::ChangePercent,
            phase: LoadPhase::Loading,
            latest_seq: 0,
        }
    }
}

// ============================================================================
// Events & Reducer
// ============================================================================

/// State transitions of the heatmap view.
#[derive(Debug, Clone)]
pub enum HeatmapEvent {
    /// The user selected a metric; a fresh fetch is issued
    MetricSelected(Metric),
    /// A fetch resolved with a batch
    FetchResolved { seq: u64, batch: StockBatch },
    /// A fetch failed
    FetchFailed { seq: u64, message: String },
}

/// Pure transition function over heatmap snapshots.
///
/// `MetricSelected` bumps `latest_seq`; the bumped value is the token the
/// shell attaches to the fetch it starts. `FetchResolved` / `FetchFailed`
/// apply only when their token is still the latest issued; stale
/// resolutions leave the snapshot unchanged.
pub fn reduce(state: &HeatmapState, event: HeatmapEvent) -> HeatmapState {
    match event {
        HeatmapEvent::MetricSelected(metric) => HeatmapState {
            metric,
            phase: LoadPhase::Loading,
            latest_seq: state.latest_seq + 1,
        },
        HeatmapEvent::FetchResolved { seq, batch } => {
            if seq != state.latest_seq {
                return state.clone();
            }
            HeatmapState {
                phase: LoadPhase::Ready(batch),
                ..state.clone()
            }
        }
        HeatmapEvent::FetchFailed { seq, message } => {
            if seq != state.latest_seq {
                return state.clone();
            }
            HeatmapState {
                phase: LoadPhase::Failed { message },
                ..state.clone()
            }
        }
    }
}
