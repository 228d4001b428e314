//! Marketboard Library
//!
//! Renders two dashboard views over a stock/screener data set:
//! a market heatmap colored by a selected metric, and a searchable catalog
//! of screener templates that can be instantiated into new saved screeners.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    marketboard (Rust Service)                   │
//! │                           :4460                                 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌───────────────┐  ┌────────────────┐  ┌────────────────────┐  │
//! │  │  Heatmap      │  │  Template      │  │  Data Provider     │  │
//! │  │  Pipeline     │  │  Catalog       │  │  (HTTP upstream)   │  │
//! │  └───────────────┘  └────────────────┘  └────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transformation core (normalize → classify → format, catalog search,
//! template instantiation) is pure and synchronous; retrieval and screener
//! creation happen at the shell behind `MarketDataProvider`.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod data;
pub mod error;
pub mod heatmap;
pub mod logging;
pub mod routes;
pub mod state;
pub mod templates;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::data::{HttpProvider, MarketDataProvider};
use crate::state::HeatmapState;

/// Dashboard service state
pub struct DashboardState {
    /// Configuration
    pub config: Config,
    /// Upstream data provider
    pub provider: Arc<dyn MarketDataProvider>,
    /// Published heatmap view snapshot
    pub heatmap: RwLock<HeatmapState>,
}

impl DashboardState {
    /// Create state backed by the HTTP provider from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let provider = Arc::new(HttpProvider::new(config.data.clone())?);
        Ok(Self::with_provider(config, provider))
    }

    /// Create state with an explicit provider (used by tests).
    pub fn with_provider(config: Config, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            config,
            provider,
            heatmap: RwLock::new(HeatmapState::initial()),
        }
    }
}

/// Build the HTTP router over shared state.
pub fn router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/heatmap", get(routes::get_heatmap))
        .route("/api/v1/status", get(routes::get_status))
        .route("/api/v1/templates", get(routes::get_templates))
        .route(
            "/api/v1/screeners/from-template",
            post(routes::create_from_template),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Main dashboard service
pub struct DashboardService {
    state: Arc<DashboardState>,
}

impl DashboardService {
    /// Create a new dashboard service
    pub fn new(config: Config) -> Result<Self> {
        let state = Arc::new(DashboardState::new(config)?);
        Ok(Self { state })
    }

    /// Start the dashboard service
    pub async fn start(self) -> Result<()> {
        let bind = self.state.config.server.bind.clone();
        let port = self.state.config.server.port;

        let app = router(self.state);

        let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
        tracing::info!(address = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
