//! ASCII-art chart viewer: redraws a fixed character grid in place on
//! every tick.

use oichart::{ascii, client::ClickHouseClient, ChartEngine, Config, SeriesStore};
use std::sync::Arc;

/// The ASCII view scrolls faster than the TUI: 5 points per tick.
const ASCII_STEP: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    oichart::init_logging();

    let config = Config::from_env();
    let client = ClickHouseClient::new(&config.clickhouse_url, &config.database)?;

    log::info!("Connecting to ClickHouse at {}...", config.clickhouse_url);
    client.ping().await?;
    log::info!("Successfully connected to ClickHouse");

    let records = client.fetch_series(&config.table, &config.symbol).await?;
    log::info!("Found {} records", records.len());
    log::info!("Starting chart display... Press Ctrl+C to exit");

    let store = Arc::new(SeriesStore::with_series(records));
    let engine = Arc::new(ChartEngine::new(store, config.window_size, ASCII_STEP));

    ascii::run_ascii(engine, config.update_interval).await?;
    Ok(())
}
