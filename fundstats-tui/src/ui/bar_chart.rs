//! Horizontal bar chart pane for the Derivatives and Assets series.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Paragraph, Widget};

use fundstats_pipeline::{BarSeries, ChartOutcome};

use crate::theme;
use crate::ui::chart_frame;

/// BarChart takes integer heights; keep two decimals of resolution.
const VALUE_SCALE: f64 = 100.0;

pub struct BarSeriesChart<'a> {
    pane: &'static str,
    outcome: Option<&'a ChartOutcome<BarSeries>>,
}

impl<'a> BarSeriesChart<'a> {
    pub fn new(pane: &'static str, outcome: Option<&'a ChartOutcome<BarSeries>>) -> Self {
        Self { pane, outcome }
    }
}

fn scaled(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * VALUE_SCALE).round() as u64
    } else {
        0
    }
}

impl Widget for BarSeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((series, inner)) =
            chart_frame(self.outcome, self.pane, |s: &BarSeries| s.title, area, buf)
        else {
            return;
        };

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let bars: Vec<Bar> = series
            .bars
            .iter()
            .map(|b| {
                let color = theme::series_color(b.color);
                Bar::default()
                    .value(scaled(b.value))
                    .text_value(format!("{:.2}", b.value))
                    .label(Line::from(b.category.as_str()))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(theme::BACKGROUND).bg(color))
            })
            .collect();

        BarChart::default()
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars))
            .render(parts[0], buf);

        Paragraph::new(Span::styled(series.value_axis, theme::muted())).render(parts[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::buffer_text;
    use fundstats_pipeline::{Bar as SeriesBar, Chart};

    fn series() -> ChartOutcome<BarSeries> {
        Ok(Chart::Series(BarSeries {
            title: "Derivatives",
            value_axis: "Gross Notional Exposure (in USD)",
            bars: vec![
                SeriesBar {
                    category: "FX Derivatives".into(),
                    value: 6.8,
                    color: "#b8c1e7",
                },
                SeriesBar {
                    category: "IR Derivatives".into(),
                    value: 12.4,
                    color: "#4e63c2",
                },
            ],
        }))
    }

    #[test]
    fn scaling_clamps_bad_values() {
        assert_eq!(scaled(1.234), 123);
        assert_eq!(scaled(-3.0), 0);
        assert_eq!(scaled(f64::NAN), 0);
    }

    #[test]
    fn renders_labels_and_axis() {
        let outcome = series();
        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);
        BarSeriesChart::new("Derivatives", Some(&outcome)).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("FX Derivatives"));
        assert!(text.contains("IR Derivatives"));
        assert!(text.contains("Gross Notional Exposure (in USD)"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let outcome = series();
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        BarSeriesChart::new("Derivatives", Some(&outcome)).render(area, &mut buf);
    }

    #[test]
    fn empty_outcome_shows_title() {
        let outcome: ChartOutcome<BarSeries> = Ok(Chart::Empty {
            title: "No Derivatives data for Luxembourg".into(),
        });
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        BarSeriesChart::new("Derivatives", Some(&outcome)).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No Derivatives data for Luxembourg"));
    }
}
