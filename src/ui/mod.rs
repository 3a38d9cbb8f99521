pub mod layout;
pub mod terminal;

pub use terminal::run_tui;
