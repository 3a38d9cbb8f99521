//! The refresh loop's shared state: series store plus window cursor, with
//! one method per command surface operation. Both the single-threaded
//! cooperative renderers (TUI, ASCII) and the multi-threaded web server
//! drive the same engine.

use crate::error::ChartError;
use crate::normalize::normalize_to_range;
use crate::record::MarketRecord;
use crate::stats::WindowStats;
use crate::store::SeriesStore;
use crate::window::{WindowCursor, MIN_WINDOW_POINTS};
use parking_lot::Mutex;
use std::ops::Range;
use std::sync::Arc;

/// Everything a renderer needs for one redraw. Recreated on every tick and
/// discarded after presentation; nothing here is cached across ticks.
#[derive(Debug, Clone)]
pub struct Frame {
    pub records: Arc<[MarketRecord]>,
    pub window: Range<usize>,
    pub prices: Vec<f64>,
    pub open_interest: Vec<f64>,
    pub normalized_oi: Vec<f64>,
    pub stats: WindowStats,
}

impl Frame {
    /// The records inside the window.
    pub fn window_records(&self) -> &[MarketRecord] {
        &self.records[self.window.clone()]
    }
}

/// A presentation sink. The engine's only contract with a renderer is
/// "accept a frame and present it".
pub trait Renderer {
    fn present(&mut self, frame: &Frame) -> Result<(), ChartError>;
}

pub struct ChartEngine {
    store: Arc<SeriesStore>,
    cursor: Mutex<WindowCursor>,
}

impl ChartEngine {
    pub fn new(store: Arc<SeriesStore>, window_size: usize, step: usize) -> Self {
        Self {
            store,
            cursor: Mutex::new(WindowCursor::new(window_size, step)),
        }
    }

    pub fn store(&self) -> &Arc<SeriesStore> {
        &self.store
    }

    /// Advance the window and build the next frame. Returns `None` when the
    /// window holds too few points to draw; the cursor keeps moving so the
    /// view recovers on a later tick.
    pub fn tick(&self) -> Option<Frame> {
        let snapshot = self.store.snapshot();
        let window = {
            let mut cursor = self.cursor.lock();
            cursor.advance(snapshot.len());
            cursor.window(snapshot.len())
        };
        Self::build_frame(snapshot, window)
    }

    /// Build a frame for the current position without advancing.
    pub fn current_frame(&self) -> Option<Frame> {
        let snapshot = self.store.snapshot();
        let window = self.cursor.lock().window(snapshot.len());
        Self::build_frame(snapshot, window)
    }

    /// Manual scroll toward older records.
    pub fn scroll_back(&self) -> Option<Frame> {
        self.cursor.lock().scroll_back();
        self.current_frame()
    }

    /// Manual scroll toward newer records.
    pub fn scroll_forward(&self) -> Option<Frame> {
        let len = self.store.len();
        self.cursor.lock().scroll_forward(len);
        self.current_frame()
    }

    /// Install a freshly fetched series: atomic replace plus cursor reset.
    /// Callers must only invoke this with a complete, successfully decoded
    /// series; on fetch failure the old data stays authoritative.
    pub fn install(&self, records: Vec<MarketRecord>) {
        self.store.replace(records);
        self.cursor.lock().reset();
    }

    fn build_frame(records: Arc<[MarketRecord]>, window: Range<usize>) -> Option<Frame> {
        if window.len() < MIN_WINDOW_POINTS {
            return None;
        }

        let slice = &records[window.clone()];
        let prices: Vec<f64> = slice.iter().map(|r| f64::from(r.price)).collect();
        let open_interest: Vec<f64> = slice.iter().map(|r| f64::from(r.open_interest)).collect();
        let normalized_oi = normalize_to_range(&open_interest, &prices);
        let stats = WindowStats::compute(
            &prices,
            &open_interest,
            window.start,
            window.end,
            records.len(),
        );

        Some(Frame {
            records,
            window,
            prices,
            open_interest,
            normalized_oi,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(price: f32, oi: u32) -> MarketRecord {
        MarketRecord {
            symbol: "jm2509".to_string(),
            time: NaiveDateTime::parse_from_str("2025-06-12 09:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            price,
            vol: 0,
            open_interest: oi,
            diff_vol: 0,
            diff_oi: 0,
            bid_1: 0.0,
            bid_volumn_1: 0,
            ask_1: 0.0,
            ask_volumn_1: 0,
            datetime: 0,
        }
    }

    fn engine(n: usize, window_size: usize, step: usize) -> ChartEngine {
        let records: Vec<MarketRecord> =
            (0..n).map(|i| record(800.0 + i as f32, 1000 + i as u32)).collect();
        ChartEngine::new(Arc::new(SeriesStore::with_series(records)), window_size, step)
    }

    #[test]
    fn test_tick_produces_frame() {
        let engine = engine(10, 4, 1);
        let frame = engine.tick().unwrap();

        assert_eq!(frame.window, 1..5);
        assert_eq!(frame.prices.len(), 4);
        assert_eq!(frame.normalized_oi.len(), 4);
        assert_eq!(frame.stats.data_points, 4);
        assert_eq!(frame.stats.total_records, 10);
        // OI remapped onto the price range.
        assert_eq!(frame.normalized_oi[0], frame.stats.min_price);
        assert_eq!(frame.normalized_oi[3], frame.stats.max_price);
    }

    #[test]
    fn test_tick_skips_degenerate_window_then_wraps() {
        let engine = engine(10, 4, 9);
        // start 9 -> 1-point window, no frame.
        assert!(engine.tick().is_none());
        // next advance wraps to 0.
        let frame = engine.tick().unwrap();
        assert_eq!(frame.window, 0..4);
    }

    #[test]
    fn test_install_resets_cursor() {
        let engine = engine(10, 4, 3);
        engine.tick();
        engine.tick();

        let records: Vec<MarketRecord> = (0..6).map(|i| record(900.0 + i as f32, 1)).collect();
        engine.install(records);

        let frame = engine.current_frame().unwrap();
        assert_eq!(frame.window, 0..4);
        assert_eq!(frame.stats.total_records, 6);
        assert_eq!(frame.stats.min_price, 900.0);
    }

    #[test]
    fn test_empty_store_produces_no_frame() {
        let engine = ChartEngine::new(Arc::new(SeriesStore::new()), 4, 1);
        assert!(engine.tick().is_none());
        assert!(engine.current_frame().is_none());
    }

    #[test]
    fn test_scroll_round_trip() {
        let engine = engine(100, 20, 1);
        let forward = engine.scroll_forward().unwrap();
        assert_eq!(forward.window, 5..25);
        let back = engine.scroll_back().unwrap();
        assert_eq!(back.window, 0..20);
    }
}
