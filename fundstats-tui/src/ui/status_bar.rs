//! Bottom status bar — key hints, dataset fingerprint, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

/// Leading hex digits of the fingerprint shown in the bar.
const FINGERPRINT_PREFIX: usize = 12;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " Tab:selector ←/→:change e:errors ?:help q:quit",
        theme::muted(),
    ));
    spans.push(Span::raw(" | "));

    let short = app
        .fingerprint
        .get(..FINGERPRINT_PREFIX)
        .unwrap_or(&app.fingerprint);
    spans.push(Span::styled(format!("data {short}"), theme::neutral()));

    if app.pending.is_some() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("updating...", theme::warning()));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::positive(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
