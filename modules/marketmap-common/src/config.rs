use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis service (the four intel endpoints plus
    /// market analysis).
    pub analysis_base_url: String,

    /// Map-provider access token. Opaque to the core; handed to the map
    /// surface at startup.
    pub map_access_token: String,

    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            analysis_base_url: required_env("ANALYSIS_API_URL"),
            map_access_token: env::var("MAP_ACCESS_TOKEN").unwrap_or_default(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
