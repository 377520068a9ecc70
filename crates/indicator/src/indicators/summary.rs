use serde::{Deserialize, Serialize};

use common::DerivedPoint;

/// Latest values of a derived series, as shown next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSummary {
    pub time: Option<i64>,
    pub close: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
    pub point_count: usize,
    pub dot_count: usize,
}

impl IndicatorSummary {
    pub fn from_points(points: &[DerivedPoint]) -> Self {
        let latest = points.last();
        Self {
            time: latest.map(|p| p.time),
            close: latest.map(|p| p.close),
            macd: latest.and_then(|p| p.macd),
            signal: latest.and_then(|p| p.signal),
            histogram: latest.and_then(|p| p.histogram),
            point_count: points.len(),
            dot_count: points.iter().filter(|p| p.dot_value.is_some()).count(),
        }
    }
}
