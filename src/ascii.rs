//! Plain ASCII chart renderer: a fixed character grid redrawn in place on
//! every tick. Price is `*`, open interest is `#`, overlap is `@`.

use crate::engine::{ChartEngine, Frame, Renderer};
use crate::error::ChartError;
use crate::normalize::scale_to_rows;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

const CHART_WIDTH: usize = 100;
const CHART_HEIGHT: usize = 20;

/// ANSI clear-screen + cursor-home.
const CLEAR: &str = "\x1b[2J\x1b[H";

pub struct AsciiRenderer {
    width: usize,
    height: usize,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }

    /// Draw one frame into a string; separated from terminal output so the
    /// grid logic is testable.
    pub fn draw(&self, frame: &Frame) -> String {
        let mut grid = vec![vec![' '; self.width]; self.height];

        let price_rows = scale_to_rows(&frame.prices, self.height - 1);
        let oi_rows = scale_to_rows(&frame.open_interest, self.height - 1);
        let points = frame.prices.len();

        for i in 0..points {
            let x = (i * self.width / points).min(self.width - 1);

            let price_y = self.height - 1 - price_rows[i];
            grid[price_y][x] = '*';

            let oi_y = self.height - 1 - oi_rows[i];
            grid[oi_y][x] = if grid[oi_y][x] == '*' { '@' } else { '#' };
        }

        let stats = &frame.stats;
        let records = frame.window_records();
        let rule = "=".repeat(self.width + 10);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} - Price and Open Interest Chart (Window: {} points)",
            records[0].symbol.to_uppercase(),
            stats.data_points
        );
        let _ = writeln!(out, "Legend: * = Price, # = Open Interest, @ = Both");
        let _ = writeln!(out, "{rule}");

        for (i, row) in grid.iter().enumerate() {
            let label = self.height - 1 - i;
            let line: String = row.iter().collect();
            let _ = writeln!(out, "{label:2} |{line}|");
        }

        let _ = writeln!(out, "   +{}+", "-".repeat(self.width));
        let _ = writeln!(
            out,
            "   Time: {} -> {}",
            records[0].time.format("%H:%M:%S"),
            records[records.len() - 1].time.format("%H:%M:%S")
        );

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Statistics - Records {}", stats.window_info());
        let _ = writeln!(
            out,
            "Avg Price: {:.2} | Max Price: {:.2} | Min Price: {:.2}",
            stats.avg_price, stats.max_price, stats.min_price
        );
        let _ = writeln!(
            out,
            "Avg Open Interest: {:.0} | Data Points: {}",
            stats.avg_oi, stats.data_points
        );
        let _ = writeln!(out, "{rule}");

        out
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn present(&mut self, frame: &Frame) -> Result<(), ChartError> {
        print!("{CLEAR}{}", self.draw(frame));
        Ok(())
    }
}

/// Tick loop for the ASCII viewer: advance, render, sleep. Runs until the
/// process is interrupted.
pub async fn run_ascii(
    engine: Arc<ChartEngine>,
    interval: Duration,
) -> Result<(), ChartError> {
    let mut renderer = AsciiRenderer::new();
    loop {
        if let Some(frame) = engine.tick() {
            renderer.present(&frame)?;
        }
        tokio::time::sleep(interval).await;
    }
}
