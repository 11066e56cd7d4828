//! Metrics column — fund-type totals on top, the selected jurisdiction below.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use fundstats_pipeline::MetricsPanel;

use crate::theme;

pub struct MetricsColumn<'a> {
    panel: Option<&'a MetricsPanel>,
}

impl<'a> MetricsColumn<'a> {
    pub fn new(panel: Option<&'a MetricsPanel>) -> Self {
        Self { panel }
    }
}

fn figure<'a>(value: &'a str, caption: &'a str) -> [Line<'a>; 2] {
    [
        Line::from(Span::styled(value, theme::accent_bold())),
        Line::from(Span::styled(caption, theme::muted())),
    ]
}

impl Widget for MetricsColumn<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::panel_border(false))
            .title(" Metrics ")
            .title_style(theme::panel_title(false));

        let Some(p) = self.panel else {
            Paragraph::new(Span::styled("Waiting for data...", theme::muted()))
                .block(block)
                .render(area, buf);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(p.label.as_str(), theme::neutral())));
        lines.extend(figure(&p.total_nav, "Total NAV"));
        lines.extend(figure(&p.total_funds, "Total Funds"));
        lines.push(Line::from(Span::styled(p.jurisdictions.as_str(), theme::muted())));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(p.country.as_str(), theme::neutral())));
        lines.extend(figure(&p.country_nav, &p.country_nav_share));
        lines.extend(figure(&p.country_funds, &p.country_funds_share));
        lines.extend(figure(
            &p.leverage_incl,
            "Gross Leverage (incl. IR and FX Derivatives)",
        ));
        lines.extend(figure(
            &p.leverage_excl,
            "Gross Leverage (excl. IR and FX Derivatives)",
        ));
        lines.extend(figure(&p.synthetic_leverage, "Synthetic Leverage"));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
