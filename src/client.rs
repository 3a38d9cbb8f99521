//! ClickHouse HTTP client: raw SQL text in, tab-separated rows out.

use crate::error::ChartError;
use crate::record::{self, MarketRecord};
use std::time::Duration;

const COLUMNS: &str =
    "symbol, time, price, vol, open_interest, diff_vol, diff_oi, bid_1, bid_volumn_1, ask_1, ask_volumn_1, datetime";

/// Allow-list check for table and symbol names that end up inside SQL
/// text. Anything beyond `[A-Za-z0-9_]` is rejected before a query is
/// built from it.
pub fn validate_identifier(name: &str) -> Result<&str, ChartError> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(ChartError::InvalidIdentifier(name.to_string()))
    }
}

pub struct ClickHouseClient {
    http: reqwest::Client,
    base_url: String,
    database: String,
}

impl ClickHouseClient {
    pub fn new(base_url: &str, database: &str) -> Result<Self, ChartError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            database: database.to_string(),
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Execute raw SQL and return the response body. Non-200 responses are
    /// a hard failure carrying the upstream error text.
    pub async fn execute(&self, query: &str) -> Result<String, ChartError> {
        let resp = self
            .http
            .get(format!("{}/", self.base_url))
            .query(&[("database", self.database.as_str()), ("query", query)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ChartError::Upstream { status, body });
        }
        Ok(body)
    }

    /// Connectivity probe, run at startup before any real query.
    pub async fn ping(&self) -> Result<(), ChartError> {
        self.execute("SELECT 1").await.map(|_| ())
    }

    /// Fetch the full series for one symbol, ordered by time ascending.
    /// An empty result set is an error; the caller keeps whatever series
    /// it already holds.
    pub async fn fetch_series(
        &self,
        table: &str,
        symbol: &str,
    ) -> Result<Vec<MarketRecord>, ChartError> {
        let table = validate_identifier(table)?;
        let symbol = validate_identifier(symbol)?;

        let query = format!(
            "SELECT {COLUMNS} FROM {}.{table} WHERE symbol = '{symbol}' ORDER BY time ASC FORMAT TabSeparated",
            self.database
        );

        let body = self.execute(&query).await?;
        let records = record::decode_tsv(&body);
        if records.is_empty() {
            return Err(ChartError::NoData);
        }
        log::info!("Fetched {} records for {symbol} from {table}", records.len());
        Ok(records)
    }

    /// Fetch the newest `limit` records, returned in ascending time order.
    pub async fn fetch_latest(
        &self,
        table: &str,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<MarketRecord>, ChartError> {
        let table = validate_identifier(table)?;
        let symbol = validate_identifier(symbol)?;

        let query = format!(
            "SELECT {COLUMNS} FROM {}.{table} WHERE symbol = '{symbol}' ORDER BY time DESC LIMIT {limit} FORMAT TabSeparated",
            self.database
        );

        let body = self.execute(&query).await?;
        let mut records = record::decode_tsv(&body);
        if records.is_empty() {
            return Err(ChartError::NoData);
        }
        records.reverse();
        Ok(records)
    }

    /// List the tables in the configured database.
    pub async fn list_tables(&self) -> Result<Vec<String>, ChartError> {
        let body = self.execute("SHOW TABLES").await?;
        Ok(non_empty_lines(&body))
    }

    /// List the distinct symbols present in a table.
    pub async fn list_symbols(&self, table: &str) -> Result<Vec<String>, ChartError> {
        let table = validate_identifier(table)?;
        let query = format!(
            "SELECT DISTINCT symbol FROM {}.{table} ORDER BY symbol",
            self.database
        );
        let body = self.execute(&query).await?;
        Ok(non_empty_lines(&body))
    }
}

fn non_empty_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier_accepts_plain_names() {
        assert!(validate_identifier("jm").is_ok());
        assert!(validate_identifier("jm2509").is_ok());
        assert!(validate_identifier("open_interest_5m").is_ok());
    }

    #[test]
    fn test_validate_identifier_rejects_injection() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("jm; DROP TABLE jm").is_err());
        assert!(validate_identifier("jm'--").is_err());
        assert!(validate_identifier("feature.jm").is_err());
        assert!(validate_identifier("jm 2509").is_err());
    }

    #[test]
    fn test_non_empty_lines() {
        assert_eq!(
            non_empty_lines("jm\n\n  SA \nrb\n"),
            vec!["jm".to_string(), "SA".to_string(), "rb".to_string()]
        );
    }
}
