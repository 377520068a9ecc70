use tracing::debug;

use common::{DerivedPoint, Error, PriceSample, Result, SignalAveraging, ZeroLagMacdParams};

use super::ema::{ema, sma};
use super::zero_lag::zero_lag_average;

/// Validated smoothing periods, converted from the signed wire parameters.
#[derive(Debug, Clone, Copy)]
struct Periods {
    fast: usize,
    slow: usize,
    signal: usize,
    /// `None` when the extra MACD smoothing pass is disabled.
    macd_ema: Option<usize>,
}

impl Periods {
    fn from_params(params: &ZeroLagMacdParams) -> Result<Self> {
        let fast = length("fastLength", params.fast_length, 1)?;
        let slow = length("slowLength", params.slow_length, 1)?;
        let signal = length("signalLength", params.signal_length, 1)?;
        let macd_ema = length("macdEmaLength", params.macd_ema_length, 0)?;
        Ok(Self {
            fast,
            slow,
            signal,
            macd_ema: (macd_ema > 0).then_some(macd_ema),
        })
    }
}

fn length(name: &'static str, value: i64, min: i64) -> Result<usize> {
    if value < min {
        return Err(Error::InvalidParameter { name, value, min });
    }
    usize::try_from(value).map_err(|_| Error::InvalidParameter { name, value, min })
}

/// Check parameters without computing anything.
pub fn validate_params(params: &ZeroLagMacdParams) -> Result<()> {
    Periods::from_params(params).map(|_| ())
}

/// Reject non-finite prices and non-increasing time labels.
fn validate_samples(samples: &[PriceSample]) -> Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.close.is_finite() {
            return Err(Error::MalformedSample {
                index,
                reason: format!("close must be finite, got {}", sample.close),
            });
        }
    }
    for (i, pair) in samples.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(Error::MalformedSample {
                index: i + 1,
                reason: format!(
                    "time must be strictly increasing, got {} after {}",
                    pair[1].time, pair[0].time
                ),
            });
        }
    }
    Ok(())
}

/// Reject a line that left the finite range. Finite closes near `f64::MAX`
/// overflow in the `2·x` compensation steps.
fn ensure_finite(line: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NumericOverflow { index, line }),
        None => Ok(()),
    }
}

/// Compute the zero-lag MACD over a whole price series (oldest first).
///
/// Returns one [`DerivedPoint`] per input sample. Under EMA signal averaging
/// every value is defined from index 0. Under SMA signal averaging `macd`,
/// `signal` and `histogram` are `None` for the first `signalLength − 1` points.
///
/// Fails fast on invalid lengths or malformed samples, and with
/// [`Error::NumericOverflow`] when prices are too large for any line to stay
/// finite. An empty series is not an error and yields an empty output.
pub fn compute_zero_lag_macd(
    samples: &[PriceSample],
    params: &ZeroLagMacdParams,
) -> Result<Vec<DerivedPoint>> {
    let periods = Periods::from_params(params)?;
    validate_samples(samples)?;

    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let closes: Vec<f64> = samples.iter().map(|s| s.close).collect();

    let fast = zero_lag_average(&closes, periods.fast, params.algorithm);
    let slow = zero_lag_average(&closes, periods.slow, params.algorithm);
    ensure_finite("fast average", &fast)?;
    ensure_finite("slow average", &slow)?;
    let raw_macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

    let macd = match periods.macd_ema {
        Some(period) => ema(&raw_macd, period),
        None => raw_macd,
    };
    ensure_finite("macd", &macd)?;

    let (macd_line, signal_line): (Vec<Option<f64>>, Vec<Option<f64>>) =
        match params.signal_averaging {
            SignalAveraging::Ema => {
                let signal = ema(&macd, periods.signal);
                (
                    macd.into_iter().map(Some).collect(),
                    signal.into_iter().map(Some).collect(),
                )
            }
            SignalAveraging::Sma => {
                let signal = sma(&macd, periods.signal);
                // MACD is reported only once its signal exists.
                let masked: Vec<Option<f64>> = macd
                    .into_iter()
                    .zip(signal.iter().copied())
                    .map(|(m, s)| s.map(|_| m))
                    .collect();
                (masked, signal)
            }
        };

    let points: Vec<DerivedPoint> = samples
        .iter()
        .zip(macd_line.into_iter().zip(signal_line))
        .map(|(sample, (macd, signal))| {
            let histogram = match (macd, signal) {
                (Some(m), Some(s)) => Some(m - s),
                _ => None,
            };
            let dot_value = match histogram {
                Some(h) if params.show_dots && h > 0.0 => Some(sample.close),
                _ => None,
            };
            DerivedPoint {
                time: sample.time,
                close: sample.close,
                macd,
                signal,
                histogram,
                dot_value,
            }
        })
        .collect();

    for (index, p) in points.iter().enumerate() {
        if !p.signal.map_or(true, f64::is_finite) {
            return Err(Error::NumericOverflow { index, line: "signal" });
        }
        if !p.histogram.map_or(true, f64::is_finite) {
            return Err(Error::NumericOverflow { index, line: "histogram" });
        }
    }

    debug!(
        samples = samples.len(),
        algorithm = %params.algorithm,
        signal_averaging = %params.signal_averaging,
        fast = periods.fast,
        slow = periods.slow,
        signal = periods.signal,
        "Computed zero-lag MACD"
    );

    Ok(points)
}
