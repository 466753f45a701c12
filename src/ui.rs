use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, InputMode};
use crate::comparison::{project, ComparisonRow, METRIC_LABELS};
use crate::format::{format_currency, format_percent_change, truncate, Trend};
use crate::types::{MarketRecord, SortDirection};

// ---------------------------------------------------------------------------
// Rendering — pure consumer of the engine's output
// ---------------------------------------------------------------------------

pub fn render(f: &mut Frame, app: &App, table_state: &mut TableState) {
    let area = f.area();

    let comparison_height = if app.view.comparison_active {
        // Header row + one row per selected record + borders.
        app.view.selection.len() as u16 + 4
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                 // header
            Constraint::Length(3),                 // search / controls
            Constraint::Length(comparison_height), // comparison panel
            Constraint::Min(0),                    // table
            Constraint::Length(1),                 // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_search(f, app, chunks[1]);
    if app.view.comparison_active {
        render_comparison(f, app, chunks[2]);
    }
    render_table(f, app, table_state, chunks[3]);
    render_footer(f, app, chunks[4]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let (status_text, status_color) = if app.loading {
        ("◌ loading".to_string(), Color::Yellow)
    } else if let Some(err) = &app.error {
        (format!("✗ {}", truncate(err, 48)), Color::Red)
    } else {
        ("● live".to_string(), Color::Green)
    };

    let spans = vec![
        Span::styled(
            " Coinlens  ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("{} ({})", app.view.currency.code().to_uppercase(), app.view.currency.symbol()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("window {}", app.view.time_window),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(format!("page {}", app.view.page), Style::default().fg(Color::White)),
        Span::raw("  │  "),
        Span::styled(
            format!("sort {} {}", app.view.sort.field, direction_arrow(app.view.sort.direction)),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("{}/4 selected", app.view.selection.len()),
            Style::default().fg(Color::Magenta),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let term = if app.view.search_term.is_empty() && !editing {
        Span::styled("Search cryptocurrency...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.view.search_term.clone())
    };

    let mut spans = vec![Span::raw(" 🔍 "), term];
    if editing {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    if let Some(notice) = &app.notice {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Yellow)));
    }

    let border_color = if editing { Color::Cyan } else { Color::DarkGray };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(paragraph, area);
}

fn render_comparison(f: &mut Frame, app: &App, area: Rect) {
    let rows_data = project(&app.view.selection, app.view.time_window, app.view.currency);

    let header_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut header_cells = vec![Cell::from("Name").style(header_style)];
    header_cells.extend(METRIC_LABELS.iter().map(|l| Cell::from(*l).style(header_style)));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = rows_data.iter().map(comparison_row).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " COMPARISON ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(table, area);
}

fn comparison_row(row: &ComparisonRow) -> Row<'static> {
    let [price, change, cap_b, volume_b] = row.metrics;

    let change_token = format_percent_change(change);
    let change_color = trend_color(change_token.trend);

    Row::new(vec![
        Cell::from(truncate(&row.name, 16)).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format_currency(price, row.currency)),
        Cell::from(change_token.label()).style(Style::default().fg(change_color)),
        Cell::from(billions(cap_b)),
        Cell::from(billions(volume_b)),
    ])
}

fn billions(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}B"),
        None => "N/A".to_string(),
    }
}

fn render_table(f: &mut Frame, app: &App, state: &mut TableState, area: Rect) {
    let window_label = app.view.time_window.label();
    let change_header = format!("{window_label} Change");
    let header_cells = ["Sel", "Cryptocurrency", "Price", change_header.as_str(), "Market Cap", "Volume (24h)"]
        .into_iter()
        .map(|h| Cell::from(h.to_string()).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let displayed = app.displayed();
    state.select(if displayed.is_empty() { None } else { Some(app.cursor.min(displayed.len() - 1)) });

    let rows: Vec<Row> = displayed.iter().map(|&r| market_row(app, r)).collect();

    let title = if app.loading && displayed.is_empty() {
        " MARKETS (loading…) "
    } else {
        " MARKETS "
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(18),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    f.render_stateful_widget(table, area, state);
}

fn market_row(app: &App, record: &MarketRecord) -> Row<'static> {
    let selected = app.view.selection.contains(&record.id);
    let sel_mark = if selected { "[x]" } else { "[ ]" };

    let change_token = format_percent_change(app.view.time_window.change(record));
    let change_color = trend_color(change_token.trend);

    let name_cell = format!(
        "{} ({})",
        truncate(&record.name, 18),
        record.symbol.to_uppercase()
    );

    let base = if selected {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(sel_mark).style(base),
        Cell::from(name_cell).style(base.add_modifier(Modifier::BOLD)),
        Cell::from(format_currency(record.current_price, app.view.currency)).style(base),
        Cell::from(change_token.label()).style(Style::default().fg(change_color)),
        Cell::from(format_currency(record.market_cap, app.view.currency)).style(base),
        Cell::from(format_currency(record.total_volume, app.view.currency)).style(base),
    ])
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = if app.input_mode == InputMode::Search {
        &[("[Esc/Enter]", "done"), ("[type]", "search")]
    } else {
        &[
            ("[/]", "search"),
            ("[c]", "currency"),
            ("[t]", "window"),
            ("[0-5]", "sort"),
            ("[space]", "select"),
            ("[enter]", "compare"),
            ("[n/p]", "page"),
            ("[r]", "refresh"),
            ("[q]", "quit"),
        ]
    };

    let mut spans = Vec::new();
    for (keys, label) in hints {
        spans.push(Span::styled(format!(" {keys} "), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(label.to_string()));
    }
    spans.push(Span::styled(
        "  auto-refresh: 120s",
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn direction_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    }
}

fn trend_color(trend: Option<Trend>) -> Color {
    match trend {
        Some(Trend::Up) => Color::Green,
        Some(Trend::Down) => Color::Red,
        None => Color::DarkGray,
    }
}
