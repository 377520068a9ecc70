use async_trait::async_trait;

use crate::{PriceSample, Result};

/// Abstraction over where the price series comes from.
///
/// `SampleFeed` generates a deterministic synthetic series.
/// `JsonFileFeed` reads a recorded series from disk.
///
/// A source only produces samples; it never computes indicator values.
/// Every `load` returns a fresh, ordered series (oldest first).
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable name shown in logs and `/healthz`.
    fn name(&self) -> &str;

    /// Load the full price series.
    async fn load(&self) -> Result<Vec<PriceSample>>;
}
