use std::env;
use std::time::Duration;

/// Configuration loaded from environment variables (with `.env` support
/// in the binaries). Every value has a default, so the viewers run
/// against a local ClickHouse out of the box.
pub struct Config {
    pub clickhouse_url: String,
    pub database: String,
    pub table: String,
    pub symbol: String,
    pub window_size: usize,
    pub scroll_step: usize,
    pub update_interval: Duration,
    pub web_bind: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            clickhouse_url: env::var("CLICKHOUSE_URL")
                .unwrap_or_else(|_| "http://localhost:8123".to_string()),
            database: env::var("CLICKHOUSE_DATABASE").unwrap_or_else(|_| "feature".to_string()),
            table: env::var("CHART_TABLE").unwrap_or_else(|_| "jm".to_string()),
            symbol: env::var("CHART_SYMBOL").unwrap_or_else(|_| "jm2509".to_string()),
            window_size: parse_env("WINDOW_SIZE", 200),
            scroll_step: parse_env("SCROLL_STEP", 1),
            update_interval: Duration::from_millis(parse_env("UPDATE_INTERVAL_MS", 5000)),
            web_bind: env::var("WEB_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
