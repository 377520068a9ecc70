use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use common::{Error, PriceSample, PriceSource, Result};

/// Reads a recorded series from a JSON file of `[{ "time": .., "close": .. }]`.
///
/// The file is re-read on every `load`, so edits show up on the next request.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
    name: String,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl PriceSource for JsonFileFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<PriceSample>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Source(format!("failed to read '{}': {e}", self.path.display()))
        })?;
        let samples: Vec<PriceSample> = serde_json::from_str(&content).map_err(|e| {
            Error::Source(format!("failed to parse '{}': {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), count = samples.len(), "Loaded price series");
        Ok(samples)
    }
}
