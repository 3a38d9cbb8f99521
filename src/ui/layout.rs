use {
    crate::engine::Frame as ChartFrame,
    crate::record::MarketRecord,
    ratatui::{
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
        Frame,
    },
};

/// Render the full TUI layout: chart on top, legend and statistics below.
pub fn render(f: &mut Frame, frame: Option<&ChartFrame>, symbol: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(f.size());

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    match frame {
        Some(frame) => {
            render_chart(f, chunks[0], frame, symbol);
            render_stats(f, bottom[1], frame);
        }
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!("{symbol} - waiting for data"));
            f.render_widget(block, chunks[0]);
            f.render_widget(
                Block::default().borders(Borders::ALL).title("Statistics"),
                bottom[1],
            );
        }
    }

    render_legend(f, bottom[0]);
}

fn render_chart(f: &mut Frame, area: Rect, frame: &ChartFrame, symbol: &str) {
    let price_points: Vec<(f64, f64)> = frame
        .prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as f64, p))
        .collect();
    let oi_points: Vec<(f64, f64)> = frame
        .normalized_oi
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Price")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&price_points),
        Dataset::default()
            .name("Open Interest (normalized)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&oi_points),
    ];

    // Both series live in the price range after normalization.
    let y_min = frame.stats.min_price;
    let y_max = frame.stats.max_price;
    let y_pad = ((y_max - y_min) * 0.05).max(0.5);

    let x_max = (frame.prices.len().saturating_sub(1)) as f64;
    let x_labels = vec![
        Span::raw(time_label(frame.window_records().first())),
        Span::raw(time_label(frame.window_records().last())),
    ];

    let title = format!(
        "{} - Price and Open Interest (Records {})",
        symbol.to_uppercase(),
        frame.stats.window_info()
    );

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::White))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::White))
                .bounds([y_min - y_pad, y_max + y_pad])
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min)),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_legend(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::styled("Green", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Price  "),
            Span::styled("Red", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(": Open Interest (normalized)"),
        ]),
        Line::from(""),
        Line::from("Press 'q' or Esc to quit"),
        Line::from("Press 'r' to refresh data"),
        Line::from("Press 'l' to load latest records only"),
        Line::from("Left/Right: manual scroll"),
    ];

    let block = Block::default().borders(Borders::ALL).title("Legend & Controls");
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_stats(f: &mut Frame, area: Rect, frame: &ChartFrame) {
    let stats = &frame.stats;
    let records = frame.window_records();
    let time_range = format!("{} - {}", time_label(records.first()), time_label(records.last()));

    let text = vec![
        Line::from(format!("Time Range: {time_range}")),
        Line::from(format!("Avg Price: {:.2}", stats.avg_price)),
        Line::from(format!("Max Price: {:.2}", stats.max_price)),
        Line::from(format!("Min Price: {:.2}", stats.min_price)),
        Line::from(format!("Avg Open Interest: {:.0}", stats.avg_oi)),
        Line::from(format!("Window: {}", stats.window_info())),
    ];

    let block = Block::default().borders(Borders::ALL).title("Statistics");
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn time_label(record: Option<&MarketRecord>) -> String {
    record
        .map(|r| r.time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
