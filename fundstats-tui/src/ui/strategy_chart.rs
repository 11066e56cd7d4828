//! Strategy pane: one stacked proportion bar plus a legend with shares.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use fundstats_pipeline::{ChartOutcome, ProportionSeries, ProportionSlice};

use crate::theme;
use crate::ui::chart_frame;

const BLOCK: &str = "█";

pub struct ProportionChart<'a> {
    outcome: Option<&'a ChartOutcome<ProportionSeries>>,
}

impl<'a> ProportionChart<'a> {
    pub fn new(outcome: Option<&'a ChartOutcome<ProportionSeries>>) -> Self {
        Self { outcome }
    }
}

/// Split `width` cells between the slices by percent. Rounding leftovers go
/// to the largest slices so the widths always add up to `width`.
fn cell_widths(slices: &[ProportionSlice], width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = slices
        .iter()
        .map(|s| ((s.percent / 100.0) * width as f64).floor().max(0.0) as usize)
        .collect();
    let mut used: usize = widths.iter().sum();

    let mut order: Vec<usize> = (0..slices.len()).collect();
    order.sort_by(|&a, &b| slices[b].percent.total_cmp(&slices[a].percent));
    for &i in order.iter().cycle().take(slices.len() * 2) {
        if used >= width {
            break;
        }
        widths[i] += 1;
        used += 1;
    }
    widths
}

impl Widget for ProportionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((series, inner)) = chart_frame(
            self.outcome,
            "Strategy",
            |s: &ProportionSeries| s.title,
            area,
            buf,
        ) else {
            return;
        };

        let widths = cell_widths(&series.slices, inner.width as usize);
        let stacked: Vec<Span> = series
            .slices
            .iter()
            .zip(&widths)
            .map(|(slice, &w)| {
                Span::styled(
                    BLOCK.repeat(w),
                    Style::default().fg(theme::series_color(slice.color)),
                )
            })
            .collect();

        let mut lines = vec![Line::from(stacked), Line::from("")];
        for slice in &series.slices {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{BLOCK} "),
                    Style::default().fg(theme::series_color(slice.color)),
                ),
                Span::styled(format!("{:>5.1}% ", slice.percent), theme::accent()),
                Span::styled(slice.category.as_str(), theme::text()),
                Span::styled(format!("  {:.2}", slice.value), theme::muted()),
            ]));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
