use thiserror::Error;

/// Crate-level error type.
///
/// Only I/O-facing operations produce errors; the numeric helpers
/// (normalization, statistics) handle degenerate input by policy and
/// never fail.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Transport-level failure talking to the upstream database.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream database answered with a non-200 status.
    #[error("ClickHouse error (status {status}): {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The query succeeded but decoded to zero usable rows.
    #[error("no data found in the table")]
    NoData,

    /// A user-supplied table or symbol name failed the allow-list check.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Terminal or socket I/O failure (TUI setup/teardown, web bind).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
