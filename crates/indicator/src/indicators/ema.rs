//! Smoothing kernels shared by the zero-lag averages and the signal line.

/// Exponential moving average seeded with the first value.
///
/// α = 2 / (period + 1), `ema[0] = values[0]`,
/// `ema[i] = α·values[i] + (1 − α)·ema[i − 1]`.
/// Defined from index 0 onward; the output has the same length as the input.
///
/// `period` must be at least 1. Callers validate lengths before reaching here.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    debug_assert!(period >= 1, "EMA period must be >= 1");
    let alpha = 2.0 / (period as f64 + 1.0);

    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => alpha * value + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Simple moving average over the trailing `period` values.
///
/// `None` for indices `i < period − 1`: an SMA has a hard warm-up, unlike
/// [`ema`] which seeds immediately.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    debug_assert!(period >= 1, "SMA period must be >= 1");
    let warmup = (period - 1).min(values.len());

    let mut out = vec![None; warmup];
    out.extend(
        values
            .windows(period)
            .map(|w| Some(w.iter().sum::<f64>() / period as f64)),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_seeds_with_first_value() {
        let out = ema(&[10.0, 20.0, 30.0], 3);
        assert_eq!(out, vec![10.0, 15.0, 22.5]);
    }

    #[test]
    fn ema_period_1_is_identity() {
        let prices = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(ema(&prices, 1), prices.to_vec());
    }

    #[test]
    fn ema_empty_input() {
        assert!(ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_constant_series_stays_constant() {
        let out = ema(&[2.5; 20], 9);
        assert!(out.iter().all(|&v| (v - 2.5).abs() < 1e-12));
    }

    #[test]
    fn sma_warmup_is_none() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn sma_period_longer_than_series() {
        let out = sma(&[1.0, 2.0], 5);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn sma_period_1_is_identity() {
        let out = sma(&[7.0, 8.0], 1);
        assert_eq!(out, vec![Some(7.0), Some(8.0)]);
    }
}
