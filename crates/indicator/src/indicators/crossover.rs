use serde::{Deserialize, Serialize};

use common::DerivedPoint;

/// Direction of a MACD/signal crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverDirection {
    Bullish, // MACD crossed above signal line
    Bearish, // MACD crossed below signal line
}

/// A histogram sign change between two consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossover {
    /// Index of the point on which the cross is first visible.
    pub index: usize,
    pub time: i64,
    pub direction: CrossoverDirection,
}

/// Scan a derived series for MACD/signal crossovers.
///
/// Only points with a defined histogram are considered, so the warm-up prefix
/// never produces a crossover. A zero histogram keeps the previous side: a
/// dip to zero and back is not a cross. The exception is a series that
/// starts on zero (both lines seeded from the same price), where the first
/// move off zero counts.
pub fn detect_crossovers(points: &[DerivedPoint]) -> Vec<Crossover> {
    let mut crosses = Vec::new();
    let mut side: Option<i8> = None;

    for (index, point) in points.iter().enumerate() {
        let Some(h) = point.histogram else {
            continue;
        };
        let current = if h > 0.0 {
            1
        } else if h < 0.0 {
            -1
        } else {
            0
        };

        match side {
            None => side = Some(current),
            Some(_) if current == 0 => {}
            Some(prev) if prev != current => {
                crosses.push(Crossover {
                    index,
                    time: point.time,
                    direction: if current > 0 {
                        CrossoverDirection::Bullish
                    } else {
                        CrossoverDirection::Bearish
                    },
                });
                side = Some(current);
            }
            Some(_) => {}
        }
    }

    crosses
}
