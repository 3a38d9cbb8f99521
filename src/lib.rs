pub mod ascii;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod record;
pub mod stats;
pub mod store;
pub mod ui;
pub mod web;
pub mod window;

pub use config::Config;
pub use engine::{ChartEngine, Frame, Renderer};
pub use error::ChartError;
pub use record::MarketRecord;
pub use store::SeriesStore;

/// Initialize the logger, writing to stderr so the TUI alternate screen
/// stays clean.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
}
