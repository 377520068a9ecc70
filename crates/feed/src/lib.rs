mod file;

pub use file::JsonFileFeed;

use std::f64::consts::TAU;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use common::{Error, PriceSample, PriceSource, Result};

/// Deterministic synthetic price series.
///
/// A slow drift plus two sine cycles around a EUR/USD-like level, sampled
/// on a fixed interval. The same configuration always yields the same series,
/// which keeps indicator output reproducible across restarts.
#[derive(Debug, Clone)]
pub struct SampleFeed {
    len: usize,
    start: DateTime<Utc>,
    interval: Duration,
}

impl SampleFeed {
    const BASE_PRICE: f64 = 1.0850;
    const DRIFT_PER_BAR: f64 = 0.000_02;
    /// 2024-01-01T00:00:00Z
    const DEFAULT_START_SECS: i64 = 1_704_067_200;

    pub fn new(len: usize) -> Self {
        let start = DateTime::from_timestamp(Self::DEFAULT_START_SECS, 0).unwrap_or_default();
        info!(len, %start, "SampleFeed initialized");
        Self {
            len,
            start,
            interval: Duration::hours(1),
        }
    }

    /// Change the bar spacing. Time labels are whole seconds, so the interval
    /// must be at least one second or the series would not be increasing.
    pub fn with_interval(mut self, interval: Duration) -> Result<Self> {
        if interval.num_seconds() < 1 {
            return Err(Error::Config(format!(
                "sample interval must be at least 1s, got {interval}"
            )));
        }
        self.interval = interval;
        Ok(self)
    }

    /// Build the series synchronously.
    pub fn generate(&self) -> Vec<PriceSample> {
        let step = self.interval.num_seconds();
        let start = self.start.timestamp();
        (0..self.len)
            .map(|i| {
                let x = i as f64;
                let close = Self::BASE_PRICE
                    + Self::DRIFT_PER_BAR * x
                    + 0.0040 * (TAU * x / 48.0).sin()
                    + 0.0015 * (TAU * x / 13.0 + 0.7).sin();
                PriceSample::new(start + step * i as i64, close)
            })
            .collect()
    }
}

#[async_trait]
impl PriceSource for SampleFeed {
    fn name(&self) -> &str {
        "sample"
    }

    async fn load(&self) -> Result<Vec<PriceSample>> {
        let samples = self.generate();
        debug!(count = samples.len(), "Generated sample series");
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(SampleFeed::new(0).generate().len(), 0);
        assert_eq!(SampleFeed::new(240).generate().len(), 240);
    }

    #[test]
    fn series_is_deterministic() {
        let a = SampleFeed::new(100).generate();
        let b = SampleFeed::new(100).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn times_are_strictly_increasing_hourly() {
        let samples = SampleFeed::new(50).generate();
        assert_eq!(samples[0].time, 1_704_067_200);
        assert!(samples.windows(2).all(|w| w[1].time - w[0].time == 3600));
    }

    #[test]
    fn custom_interval_is_respected() {
        let samples = SampleFeed::new(3)
            .with_interval(Duration::minutes(5))
            .unwrap()
            .generate();
        assert_eq!(samples[2].time - samples[0].time, 600);
    }

    #[test]
    fn non_positive_interval_is_rejected() {
        for interval in [Duration::zero(), Duration::seconds(-60), Duration::milliseconds(500)] {
            let result = SampleFeed::new(3).with_interval(interval);
            assert!(matches!(result, Err(Error::Config(_))), "{interval} accepted");
        }
    }

    #[test]
    fn prices_are_finite_and_near_base() {
        let samples = SampleFeed::new(500).generate();
        for s in &samples {
            assert!(s.close.is_finite());
            assert!((1.07..1.11).contains(&s.close), "unexpected price {}", s.close);
        }
    }

    #[tokio::test]
    async fn load_matches_generate() {
        let feed = SampleFeed::new(30);
        assert_eq!(feed.load().await.unwrap(), feed.generate());
        assert_eq!(feed.name(), "sample");
    }
}
