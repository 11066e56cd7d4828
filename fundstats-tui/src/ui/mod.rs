//! Top-level UI layout — selectors, metrics column, 2x2 chart grid, status bar.

pub mod bar_chart;
pub mod geo_map;
pub mod header;
pub mod metrics_panel;
pub mod overlays;
pub mod status_bar;
pub mod strategy_chart;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;

use fundstats_pipeline::{Chart, ChartOutcome};

use crate::app::{AppState, Overlay};
use crate::theme;

use bar_chart::BarSeriesChart;
use geo_map::GeoMapChart;
use metrics_panel::MetricsColumn;
use strategy_chart::ProportionChart;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::render(f, chunks[0], app);
    draw_body(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, chunks[1]),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[1], app),
        Overlay::None => {}
    }
}

fn draw_body(f: &mut Frame, area: Rect, app: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(40)])
        .split(area);

    f.render_widget(MetricsColumn::new(app.view.metrics()), columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);
    let top = halves(rows[0]);
    let bottom = halves(rows[1]);

    let charts = app.view.charts();
    f.render_widget(
        BarSeriesChart::new("Derivatives", charts.map(|c| &c.derivatives)),
        top[0],
    );
    f.render_widget(GeoMapChart::new(charts.map(|c| &c.geo)), top[1]);
    f.render_widget(BarSeriesChart::new("Assets", charts.map(|c| &c.assets)), bottom[0]);
    f.render_widget(ProportionChart::new(charts.map(|c| &c.strategy)), bottom[1]);
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Draw a chart pane's border and, unless the outcome holds a series, its
/// placeholder text. Returns the series and the area left for plotting.
pub(crate) fn chart_frame<'a, T>(
    outcome: Option<&'a ChartOutcome<T>>,
    pane: &str,
    title_of: impl Fn(&T) -> &str,
    area: Rect,
    buf: &mut Buffer,
) -> Option<(&'a T, Rect)> {
    let title = match outcome {
        Some(Ok(Chart::Series(series))) => title_of(series).to_string(),
        _ => pane.to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {title} "))
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    block.render(area, buf);

    let placeholder = match outcome {
        Some(Ok(Chart::Series(series))) => return Some((series, inner)),
        Some(Ok(Chart::Empty { title })) => Span::styled(title.clone(), theme::muted()),
        Some(Err(err)) => Span::styled(err.to_string(), theme::negative()),
        None => Span::styled("Waiting for data...", theme::muted()),
    };
    Paragraph::new(vec![Line::from(""), Line::from(placeholder)])
        .wrap(Wrap { trim: true })
        .render(inner, buf);
    None
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
