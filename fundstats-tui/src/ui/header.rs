//! Header — the fund-type and country selectors.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let current = app.controller.current();
    f.render_widget(
        selector(
            Focus::FundType,
            &current.fund_type,
            app.controller.fund_types(),
            app.focus,
        ),
        halves[0],
    );
    f.render_widget(
        selector(
            Focus::Country,
            &current.country,
            app.controller.countries(),
            app.focus,
        ),
        halves[1],
    );
}

fn selector<'a>(which: Focus, value: &'a str, domain: &[String], focus: Focus) -> Paragraph<'a> {
    let focused = which == focus;
    let position = domain
        .iter()
        .position(|v| v == value)
        .map(|i| format!("{}/{}", i + 1, domain.len()))
        .unwrap_or_else(|| "-".into());

    let value_style = if focused {
        theme::accent_bold().add_modifier(Modifier::REVERSED)
    } else {
        theme::text()
    };
    let line = Line::from(vec![
        Span::styled(if focused { " ◀ " } else { "   " }, theme::accent()),
        Span::styled(format!(" {value} "), value_style),
        Span::styled(if focused { " ▶ " } else { "   " }, theme::accent()),
        Span::styled(format!(" {position}"), theme::muted()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} ", which.label()))
        .title_style(theme::panel_title(focused));
    Paragraph::new(line).block(block)
}
