pub mod crossover;
pub mod ema;
pub mod macd;
pub mod summary;
pub mod zero_lag;

pub use crossover::{detect_crossovers, Crossover, CrossoverDirection};
pub use macd::{compute_zero_lag_macd, validate_params};
pub use summary::IndicatorSummary;
