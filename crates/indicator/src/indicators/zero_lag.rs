use common::ZeroLagAlgorithm;

use super::ema::ema;

/// Zero-lag exponential moving average of `values` with the given `period`.
///
/// - `Glaz`: EMA of the lag-compensated input `2·x[i] − x[i − lag]`, where
///   `lag = (period − 1) / 2`. Indices before `lag` have no earlier sample to
///   subtract and use the raw price.
/// - `Legacy`: `2·EMA(x) − EMA(EMA(x))`, leaving the input untouched.
///
/// Both variants are defined for every index and reduce to the input series
/// when `period == 1`.
pub fn zero_lag_average(values: &[f64], period: usize, algorithm: ZeroLagAlgorithm) -> Vec<f64> {
    match algorithm {
        ZeroLagAlgorithm::Glaz => {
            let lag = (period - 1) / 2;
            let adjusted: Vec<f64> = values
                .iter()
                .enumerate()
                .map(|(i, &x)| if i < lag { x } else { 2.0 * x - values[i - lag] })
                .collect();
            ema(&adjusted, period)
        }
        ZeroLagAlgorithm::Legacy => {
            let e1 = ema(values, period);
            let e2 = ema(&e1, period);
            e1.iter().zip(&e2).map(|(a, b)| 2.0 * a - b).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn period_1_returns_input_for_both_algorithms() {
        let prices = vec![1.2, 0.7, 3.3, 2.9, 4.1];
        for algorithm in [ZeroLagAlgorithm::Glaz, ZeroLagAlgorithm::Legacy] {
            let out = zero_lag_average(&prices, 1, algorithm);
            for (a, b) in out.iter().zip(&prices) {
                assert!((a - b).abs() < 1e-12, "{algorithm}: {a} != {b}");
            }
        }
    }

    #[test]
    fn glaz_short_period_has_no_lag_offset() {
        // period 2 → lag 0 → adjusted input equals the raw input
        let prices = ramp(6);
        assert_eq!(
            zero_lag_average(&prices, 2, ZeroLagAlgorithm::Glaz),
            ema(&prices, 2)
        );
    }

    #[test]
    fn glaz_compensates_with_lagged_sample() {
        // period 5 → lag 2: adj = [1, 2, 2·3−1, 2·4−2, 2·5−3]
        let prices = ramp(5);
        let expected = ema(&[1.0, 2.0, 5.0, 6.0, 7.0], 5);
        assert_eq!(zero_lag_average(&prices, 5, ZeroLagAlgorithm::Glaz), expected);
    }

    #[test]
    fn legacy_is_double_ema_compensation() {
        let prices = ramp(8);
        let e1 = ema(&prices, 4);
        let e2 = ema(&e1, 4);
        let out = zero_lag_average(&prices, 4, ZeroLagAlgorithm::Legacy);
        for i in 0..prices.len() {
            assert_eq!(out[i], 2.0 * e1[i] - e2[i]);
        }
    }

    #[test]
    fn zero_lag_tracks_trend_closer_than_plain_ema() {
        let prices = ramp(60);
        let plain = ema(&prices, 10);
        let last = prices.len() - 1;
        for algorithm in [ZeroLagAlgorithm::Glaz, ZeroLagAlgorithm::Legacy] {
            let zl = zero_lag_average(&prices, 10, algorithm);
            let zl_gap = (prices[last] - zl[last]).abs();
            let ema_gap = (prices[last] - plain[last]).abs();
            assert!(zl_gap < ema_gap, "{algorithm}: {zl_gap} >= {ema_gap}");
        }
    }

    #[test]
    fn output_length_matches_input() {
        for algorithm in [ZeroLagAlgorithm::Glaz, ZeroLagAlgorithm::Legacy] {
            assert!(zero_lag_average(&[], 9, algorithm).is_empty());
            assert_eq!(zero_lag_average(&ramp(3), 9, algorithm).len(), 3);
        }
    }
}
