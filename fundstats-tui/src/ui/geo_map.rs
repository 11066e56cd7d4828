//! Geo pane: world outline with region share labels, choropleth legend and
//! unplaced labels underneath.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Paragraph, Widget};

use fundstats_pipeline::{ChartOutcome, GeoMap};

use crate::theme;
use crate::ui::chart_frame;

/// Legend rows shown under the map before truncating.
const MAX_LEGEND_ROWS: usize = 4;

pub struct GeoMapChart<'a> {
    outcome: Option<&'a ChartOutcome<GeoMap>>,
}

impl<'a> GeoMapChart<'a> {
    pub fn new(outcome: Option<&'a ChartOutcome<GeoMap>>) -> Self {
        Self { outcome }
    }
}

fn legend(map: &GeoMap) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    if let Some(cells) = &map.choropleth {
        let shown = cells.len().min(MAX_LEGEND_ROWS);
        for cell in &cells[..shown] {
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme::intensity_color(cell.intensity))),
                Span::styled(cell.location.as_str(), theme::text()),
                Span::styled(format!(" {:.1}%", cell.intensity * 100.0), theme::muted()),
            ]));
        }
        if cells.len() > shown {
            lines.push(Line::from(Span::styled(
                format!("  +{} more areas", cells.len() - shown),
                theme::muted(),
            )));
        }
    }
    if !map.faults.is_empty() {
        let labels: Vec<&str> = map.faults.iter().map(|f| f.label.as_str()).collect();
        lines.push(Line::from(Span::styled(
            format!("Unplaced: {}", labels.join(", ")),
            theme::warning(),
        )));
    }
    lines
}

impl Widget for GeoMapChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((map, inner)) = chart_frame(self.outcome, "Geo", |m: &GeoMap| m.title, area, buf)
        else {
            return;
        };

        let legend = legend(map);
        let legend_height = (legend.len() as u16).min(inner.height.saturating_sub(3));
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(legend_height)])
            .split(inner);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0])
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: theme::MAP_OUTLINE,
                    resolution: MapResolution::Low,
                });
                ctx.layer();
                for point in &map.points {
                    ctx.print(
                        point.position.lon,
                        point.position.lat,
                        Line::styled(point.label.clone(), theme::accent_bold()),
                    );
                }
            })
            .render(parts[0], buf);

        Paragraph::new(legend).render(parts[1], buf);
    }
}
