use serde::{Deserialize, Serialize};

/// One input observation of the price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Ordering label: unix seconds or bar index. Must be strictly increasing
    /// along the series.
    pub time: i64,
    pub close: f64,
}

impl PriceSample {
    pub fn new(time: i64, close: f64) -> Self {
        Self { time, close }
    }
}

/// Formula used to build the zero-lag averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZeroLagAlgorithm {
    /// EMA of a lag-compensated input (`2·x[i] − x[i − lag]`).
    #[default]
    Glaz,
    /// Double EMA compensation (`2·EMA − EMA(EMA)`).
    Legacy,
}

impl std::fmt::Display for ZeroLagAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZeroLagAlgorithm::Glaz => write!(f, "glaz"),
            ZeroLagAlgorithm::Legacy => write!(f, "legacy"),
        }
    }
}

/// Smoothing kernel applied to the MACD line to build the signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalAveraging {
    #[default]
    Ema,
    Sma,
}

impl std::fmt::Display for SignalAveraging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalAveraging::Ema => write!(f, "ema"),
            SignalAveraging::Sma => write!(f, "sma"),
        }
    }
}

/// Parameter set for one zero-lag MACD computation.
///
/// Lengths are signed so that out-of-range values coming from a form or a
/// query string reach the engine and are rejected with
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZeroLagMacdParams {
    pub fast_length: i64,
    pub slow_length: i64,
    pub signal_length: i64,
    /// Extra EMA pass over the MACD line. `0` disables it.
    pub macd_ema_length: i64,
    pub algorithm: ZeroLagAlgorithm,
    pub signal_averaging: SignalAveraging,
    pub show_dots: bool,
}

impl Default for ZeroLagMacdParams {
    fn default() -> Self {
        Self {
            fast_length: 12,
            slow_length: 26,
            signal_length: 9,
            macd_ema_length: 9,
            algorithm: ZeroLagAlgorithm::Glaz,
            signal_averaging: SignalAveraging::Ema,
            show_dots: true,
        }
    }
}

/// One output observation, aligned 1:1 with the input `PriceSample`.
///
/// `None` means "not yet computed" (warm-up), never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPoint {
    pub time: i64,
    pub close: f64,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
    /// Equals `close` when the histogram is positive and dots are enabled.
    pub dot_value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_deserialize_partial_object_uses_defaults() {
        let params: ZeroLagMacdParams =
            serde_json::from_str(r#"{"fastLength": 5, "algorithm": "legacy"}"#).unwrap();
        assert_eq!(params.fast_length, 5);
        assert_eq!(params.algorithm, ZeroLagAlgorithm::Legacy);
        assert_eq!(params.slow_length, 26);
        assert_eq!(params.signal_averaging, SignalAveraging::Ema);
        assert!(params.show_dots);
    }

    #[test]
    fn params_accept_negative_lengths_for_later_validation() {
        let params: ZeroLagMacdParams = serde_json::from_str(r#"{"signalLength": -3}"#).unwrap();
        assert_eq!(params.signal_length, -3);
    }

    #[test]
    fn derived_point_serializes_absent_values_as_null() {
        let point = DerivedPoint {
            time: 7,
            close: 1.5,
            macd: None,
            signal: None,
            histogram: None,
            dot_value: None,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["time"], 7);
        assert!(json["macd"].is_null());
        assert!(json["dotValue"].is_null());
    }

    #[test]
    fn enums_display_matches_wire_names() {
        assert_eq!(ZeroLagAlgorithm::Legacy.to_string(), "legacy");
        assert_eq!(SignalAveraging::Sma.to_string(), "sma");
        let wire = serde_json::to_string(&ZeroLagAlgorithm::Glaz).unwrap();
        assert_eq!(wire, "\"glaz\"");
    }
}
