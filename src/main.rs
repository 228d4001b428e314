//! Marketboard - market heatmap and screener-template dashboard service.

use anyhow::Result;
use marketboard::config::Config;
use marketboard::logging::init_logging;
use marketboard::DashboardService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("Marketboard v{}", env!("CARGO_PKG_VERSION"));

    let service = DashboardService::new(config)?;
    service.start().await
}
