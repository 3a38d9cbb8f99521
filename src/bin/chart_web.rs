//! Web chart viewer: embedded Chart.js page plus a JSON polling API, with
//! a background task advancing the window.

use oichart::web::{self, AppState};
use oichart::{client::ClickHouseClient, ChartEngine, Config, SeriesStore};
use std::sync::Arc;

/// The web view advances in larger strides so polling clients see the
/// window move between 2 s polls.
const WEB_STEP: usize = 50;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    oichart::init_logging();

    let config = Config::from_env();
    let client = Arc::new(ClickHouseClient::new(&config.clickhouse_url, &config.database)?);

    log::info!("Connecting to ClickHouse at {}...", config.clickhouse_url);
    client.ping().await?;
    log::info!("Successfully connected to ClickHouse");

    let records = client.fetch_series(&config.table, &config.symbol).await?;
    log::info!("Found {} records", records.len());

    let store = Arc::new(SeriesStore::with_series(records));
    let engine = Arc::new(ChartEngine::new(store, config.window_size, WEB_STEP));

    let state = AppState { engine, client };
    web::serve(state, &config.web_bind, config.update_interval).await?;
    Ok(())
}
