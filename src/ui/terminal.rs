use {
    crate::{
        client::ClickHouseClient,
        config::Config,
        engine::{ChartEngine, Frame},
        error::ChartError,
        ui::layout,
    },
    crossterm::event::{Event, KeyCode},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{sync::Arc, time::Instant},
};

/// Run the TUI event loop.
///
/// A single control thread interleaves the auto-advance timer with
/// keyboard input: `event::poll` with the time remaining until the next
/// tick doubles as the timer, and each event runs to completion before
/// the next is considered.
pub async fn run_tui(
    engine: Arc<ChartEngine>,
    client: Arc<ClickHouseClient>,
    config: &Config,
) -> Result<(), ChartError> {
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;
    // Alternate screen isolates the chart from stderr logs.
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &engine, &client, config).await;

    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    engine: &ChartEngine,
    client: &ClickHouseClient,
    config: &Config,
) -> Result<(), ChartError> {
    let mut frame: Option<Frame> = engine.current_frame();
    let mut next_tick = Instant::now() + config.update_interval;

    loop {
        terminal.draw(|f| layout::render(f, frame.as_ref(), &config.symbol))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if crossterm::event::poll(timeout)? {
            match crossterm::event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => {
                        match client.fetch_series(&config.table, &config.symbol).await {
                            Ok(records) => {
                                engine.install(records);
                                frame = engine.current_frame();
                            }
                            Err(e) => {
                                // Old series stays authoritative.
                                log::warn!("Failed to refresh data: {e}");
                            }
                        }
                    }
                    KeyCode::Char('l') => {
                        // Load only the newest records instead of the full
                        // history.
                        let limit = config.window_size * 5;
                        match client.fetch_latest(&config.table, &config.symbol, limit).await {
                            Ok(records) => {
                                engine.install(records);
                                frame = engine.current_frame();
                            }
                            Err(e) => {
                                log::warn!("Failed to load latest data: {e}");
                            }
                        }
                    }
                    KeyCode::Left => {
                        if let Some(f) = engine.scroll_back() {
                            frame = Some(f);
                        }
                    }
                    KeyCode::Right => {
                        if let Some(f) = engine.scroll_forward() {
                            frame = Some(f);
                        }
                    }
                    _ => {}
                },
                // Relayout happens on the next draw.
                Event::Resize(_, _) => {}
                _ => {}
            }
        } else {
            // Timer fired: auto-advance. A degenerate window keeps the
            // previous frame on screen.
            if let Some(f) = engine.tick() {
                frame = Some(f);
            }
            next_tick = Instant::now() + config.update_interval;
        }
    }

    Ok(())
}
