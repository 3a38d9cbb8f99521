//! Interactive terminal chart viewer.

use oichart::{client::ClickHouseClient, ui, ChartEngine, Config, SeriesStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    oichart::init_logging();

    let config = Config::from_env();
    let client = Arc::new(ClickHouseClient::new(&config.clickhouse_url, &config.database)?);

    log::info!("Connecting to ClickHouse at {}...", config.clickhouse_url);
    client.ping().await?;
    log::info!("Successfully connected to ClickHouse");

    // Startup fetch is fatal on failure; later refreshes are not.
    let records = client.fetch_series(&config.table, &config.symbol).await?;
    log::info!("Found {} records", records.len());

    let store = Arc::new(SeriesStore::with_series(records));
    let engine = Arc::new(ChartEngine::new(store, config.window_size, config.scroll_step));

    ui::run_tui(engine, client, &config).await?;
    Ok(())
}
