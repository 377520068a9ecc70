pub mod config;
pub mod indicators;

pub use config::IndicatorFileConfig;
pub use indicators::{
    compute_zero_lag_macd, detect_crossovers, validate_params, Crossover, CrossoverDirection,
    IndicatorSummary,
};
