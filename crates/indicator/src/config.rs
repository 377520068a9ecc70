use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use common::{Error, Result, ZeroLagMacdParams};

use crate::indicators::validate_params;

/// Indicator parameter file (TOML).
///
/// Example `config/zlmacd.toml`:
/// ```toml
/// [params]
/// fastLength = 12
/// slowLength = 26
/// signalLength = 9
/// macdEmaLength = 9
/// algorithm = "glaz"
/// signalAveraging = "ema"
/// showDots = true
/// ```
/// Missing keys take their built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndicatorFileConfig {
    #[serde(default)]
    pub params: ZeroLagMacdParams,
}

impl IndicatorFileConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        validate_params(&cfg.params)?;
        Ok(cfg)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read indicator config at '{}': {e}",
                path.display()
            ))
        })?;
        let cfg = Self::from_toml(&content)?;
        info!(path = %path.display(), "Loaded indicator parameters");
        Ok(cfg)
    }

    /// Load from a TOML file, falling back to built-in defaults when the file
    /// does not exist. A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "Indicator config not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{SignalAveraging, ZeroLagAlgorithm};

    #[test]
    fn parses_full_params_table() {
        let cfg = IndicatorFileConfig::from_toml(
            r#"
            [params]
            fastLength = 8
            slowLength = 21
            signalLength = 5
            macdEmaLength = 0
            algorithm = "legacy"
            signalAveraging = "sma"
            showDots = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.params.fast_length, 8);
        assert_eq!(cfg.params.slow_length, 21);
        assert_eq!(cfg.params.macd_ema_length, 0);
        assert_eq!(cfg.params.algorithm, ZeroLagAlgorithm::Legacy);
        assert_eq!(cfg.params.signal_averaging, SignalAveraging::Sma);
        assert!(!cfg.params.show_dots);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = IndicatorFileConfig::from_toml("").unwrap();
        assert_eq!(cfg.params, ZeroLagMacdParams::default());
    }

    #[test]
    fn invalid_length_is_a_config_error() {
        let err = IndicatorFileConfig::from_toml("[params]\nfastLength = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "fastLength", .. }));
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = IndicatorFileConfig::from_toml("[params]\nalgorithm = \"hull\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = IndicatorFileConfig::load_or_default("does/not/exist/zlmacd.toml").unwrap();
        assert_eq!(cfg.params, ZeroLagMacdParams::default());
    }
}
