//! Web front-end: an embedded Chart.js polling page plus a JSON API over
//! the shared chart engine. A background task advances the window on the
//! tick interval while request handlers take read snapshots.

use crate::client::ClickHouseClient;
use crate::engine::{ChartEngine, Frame};
use crate::error::ChartError;
use crate::record::MarketRecord;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ChartEngine>,
    pub client: Arc<ClickHouseClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/data", get(data))
        .route("/tables", get(tables))
        .route("/symbols", get(symbols))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve the web viewer until the process is stopped.
pub async fn serve(state: AppState, bind: &str, tick_interval: Duration) -> Result<(), ChartError> {
    spawn_window_advancer(Arc::clone(&state.engine), tick_interval);

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    log::info!("Web server listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Background task: auto-advance the window so polling clients see the
/// series scroll.
fn spawn_window_advancer(engine: Arc<ChartEngine>, tick_interval: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_interval);
        loop {
            interval.tick().await;
            if let Some(frame) = engine.tick() {
                log::debug!(
                    "Window {} | Avg Price: {:.2} | Max: {:.2} | Min: {:.2} | Avg OI: {:.0}",
                    frame.stats.window_info(),
                    frame.stats.avg_price,
                    frame.stats.max_price,
                    frame.stats.min_price,
                    frame.stats.avg_oi
                );
            }
        }
    });
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Deserialize)]
struct DataParams {
    table: Option<String>,
    symbol: Option<String>,
}

/// Current window as JSON. With `?table=&symbol=` the series is re-fetched
/// and atomically replaced first; on failure the old series keeps serving
/// and the error is reported in the payload the polling client expects.
async fn data(State(state): State<AppState>, Query(params): Query<DataParams>) -> Json<Value> {
    if let (Some(table), Some(symbol)) = (params.table.as_deref(), params.symbol.as_deref()) {
        match state.client.fetch_series(table, symbol).await {
            Ok(records) => {
                log::info!(
                    "Dynamic query: table={table}, symbol={symbol}, {} records",
                    records.len()
                );
                state.engine.install(records);
            }
            Err(ChartError::NoData) => {
                return Json(json!({
                    "error": format!("no data for symbol {symbol} in table {table}")
                }));
            }
            Err(e) => {
                log::warn!("Dynamic query failed: {e}");
                return Json(json!({ "error": format!("query failed: {e}") }));
            }
        }
    }

    match state.engine.current_frame() {
        Some(frame) => Json(frame_payload(&frame)),
        None => Json(json!({ "error": "No data available" })),
    }
}

async fn tables(State(state): State<AppState>) -> Json<Value> {
    match state.client.list_tables().await {
        Ok(tables) => Json(json!({ "tables": tables })),
        Err(e) => Json(json!({ "error": format!("failed to list tables: {e}") })),
    }
}

#[derive(Deserialize)]
struct SymbolParams {
    table: Option<String>,
}

async fn symbols(State(state): State<AppState>, Query(params): Query<SymbolParams>) -> Json<Value> {
    let Some(table) = params.table.as_deref() else {
        return Json(json!({ "error": "missing table parameter" }));
    };
    match state.client.list_symbols(table).await {
        Ok(symbols) => Json(json!({ "table": table, "symbols": symbols })),
        Err(e) => Json(json!({ "error": format!("failed to list symbols: {e}") })),
    }
}

/// Build the `/data` response. Record floats are forced finite before
/// serialization; if encoding still fails the client gets an explicit
/// error payload rather than invalid JSON.
fn frame_payload(frame: &Frame) -> Value {
    let data: Vec<MarketRecord> = frame.window_records().iter().map(sanitize_record).collect();

    let payload = json!({
        "data": data,
        "stats": &frame.stats,
        "window": frame.stats.window_info(),
        "timestamp": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    });

    match serde_json::to_string(&payload) {
        Ok(_) => payload,
        Err(e) => {
            log::error!("JSON encoding error: {e}");
            json!({
                "error": "data contains values that cannot be serialized",
                "stats": { "data_points": data.len() },
            })
        }
    }
}

/// Zero out non-finite float fields so the serialized form stays finite.
fn sanitize_record(record: &MarketRecord) -> MarketRecord {
    let mut clean = record.clone();
    if !clean.price.is_finite() {
        clean.price = 0.0;
    }
    if !clean.bid_1.is_finite() {
        clean.bid_1 = 0.0;
    }
    if !clean.ask_1.is_finite() {
        clean.ask_1 = 0.0;
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::decode_tsv;
    use crate::store::SeriesStore;

    fn test_frame() -> Frame {
        let rows: String = (0..5)
            .map(|i| {
                format!(
                    "jm2509\t2025-06-12 09:3{}:00\t{}\t10\t{}\t1\t-1\t844.0\t5\t846.0\t5\t7\n",
                    i,
                    840 + i,
                    2000 + i
                )
            })
            .collect();
        let store = Arc::new(SeriesStore::with_series(decode_tsv(&rows)));
        ChartEngine::new(store, 5, 1).current_frame().unwrap()
    }

    #[test]
    fn test_frame_payload_shape() {
        let payload = frame_payload(&test_frame());

        assert_eq!(payload["data"].as_array().unwrap().len(), 5);
        assert_eq!(payload["data"][0]["symbol"], "jm2509");
        assert_eq!(payload["data"][0]["time"], "2025-06-12 09:30:00");
        assert_eq!(payload["stats"]["avg_price"], 842.0);
        assert_eq!(payload["stats"]["max_price"], 844.0);
        assert_eq!(payload["stats"]["min_price"], 840.0);
        assert_eq!(payload["stats"]["data_points"], 5);
        assert_eq!(payload["stats"]["total_records"], 5);
        assert_eq!(payload["window"], "1-5 of 5");
        assert!(payload["timestamp"].is_string());
        assert!(payload.get("error").is_none());
    }

    #[test]
    fn test_sanitize_record_zeroes_non_finite() {
        let mut record = test_frame().window_records()[0].clone();
        record.price = f32::NAN;
        record.bid_1 = f32::INFINITY;

        let clean = sanitize_record(&record);
        assert_eq!(clean.price, 0.0);
        assert_eq!(clean.bid_1, 0.0);
        assert_eq!(clean.ask_1, 846.0);

        // The whole payload stays valid JSON after sanitation.
        let json = serde_json::to_string(&clean).unwrap();
        assert!(!json.contains("null"));
    }
}
