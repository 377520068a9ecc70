use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api::AppState;
use common::{Config, PriceSource};
use feed::{JsonFileFeed, SampleFeed};
use indicator::{compute_zero_lag_macd, IndicatorFileConfig, IndicatorSummary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let file_cfg = IndicatorFileConfig::load_or_default(&cfg.params_path)
        .with_context(|| format!("loading indicator parameters from '{}'", cfg.params_path))?;
    let defaults = file_cfg.params;
    info!(
        fast = defaults.fast_length,
        slow = defaults.slow_length,
        signal = defaults.signal_length,
        macd_ema = defaults.macd_ema_length,
        algorithm = %defaults.algorithm,
        signal_averaging = %defaults.signal_averaging,
        "Zero Lag MACD starting"
    );

    // ── Price source ──────────────────────────────────────────────────────────
    let source: Arc<dyn PriceSource> = match &cfg.data_path {
        Some(path) => {
            info!(%path, "Using JSON price file");
            Arc::new(JsonFileFeed::new(path))
        }
        None => {
            info!(len = cfg.sample_len, "No data path set, using sample series");
            Arc::new(SampleFeed::new(cfg.sample_len))
        }
    };

    // ── Startup check: compute once with the defaults ─────────────────────────
    let samples = source
        .load()
        .await
        .with_context(|| format!("loading price series from {}", source.name()))?;
    let points = compute_zero_lag_macd(&samples, &defaults)
        .context("computing zero-lag MACD with default parameters")?;
    let summary = IndicatorSummary::from_points(&points);
    match (summary.close, summary.macd, summary.signal, summary.histogram) {
        (Some(close), Some(macd), Some(signal), Some(histogram)) => info!(
            points = summary.point_count,
            dots = summary.dot_count,
            close = %format!("{close:.5}"),
            macd = %format!("{macd:.5}"),
            signal = %format!("{signal:.5}"),
            histogram = %format!("{histogram:.5}"),
            "Latest indicator values"
        ),
        _ => warn!(
            points = summary.point_count,
            "Not enough history for indicator values"
        ),
    }

    // ── API ───────────────────────────────────────────────────────────────────
    let state = AppState { source, defaults };
    api::serve(state, cfg.port, shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
