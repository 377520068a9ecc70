/// Runtime configuration loaded from environment variables at startup.
/// Every variable is optional; unparsable values fall back to the default.
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP / WebSocket API
    pub port: u16,

    // Indicator parameter defaults (TOML)
    pub params_path: String,

    // Price data
    /// JSON file with `[{ "time": .., "close": .. }]`. `None` selects the
    /// synthetic sample feed.
    pub data_path: Option<String>,
    pub sample_len: usize,
}

impl Config {
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_PARAMS_PATH: &'static str = "config/zlmacd.toml";
    pub const DEFAULT_SAMPLE_LEN: usize = 240;

    /// Load configuration from the environment. Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            port: optional_env("ZLMACD_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::DEFAULT_PORT),
            params_path: optional_env("ZLMACD_PARAMS_PATH")
                .unwrap_or_else(|| Self::DEFAULT_PARAMS_PATH.to_string()),
            data_path: optional_env("ZLMACD_DATA_PATH").filter(|v| !v.trim().is_empty()),
            sample_len: optional_env("ZLMACD_SAMPLE_LEN")
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::DEFAULT_SAMPLE_LEN),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
