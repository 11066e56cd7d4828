//! Chart projectors — one per dashboard chart.
//!
//! Each projector takes a country, filters its table, and returns a
//! [`ChartOutcome`]: either a chart (`Empty` placeholder or a series) or a
//! [`ChartError`] local to that chart.

pub mod assets;
pub mod derivatives;
pub mod geo;
pub mod palette;
pub mod strategy;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub use geo::{ChoroplethCell, GeoMap, RegionPoint};
pub use palette::Palette;
pub use strategy::{ProportionSeries, ProportionSlice};

/// Output of a projector: a neutral placeholder or the chart-specific series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart<T> {
    /// No rows (or nothing to divide by) for the selected country.
    Empty { title: String },
    Series(T),
}

impl<T> Chart<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Chart::Empty { .. })
    }

    pub fn series(&self) -> Option<&T> {
        match self {
            Chart::Series(series) => Some(series),
            Chart::Empty { .. } => None,
        }
    }
}

/// Which of the four charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    Derivatives,
    Assets,
    Strategy,
    Geo,
}

impl ChartKind {
    /// Delivery order to the render surface.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Derivatives,
        ChartKind::Assets,
        ChartKind::Strategy,
        ChartKind::Geo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Derivatives => "Derivatives",
            ChartKind::Assets => "Assets",
            ChartKind::Strategy => "Strategy",
            ChartKind::Geo => "Geo",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure of a single chart. Never fatal: the other charts and the metrics
/// panel still render.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ChartError {
    #[error("{chart} chart: non-finite {field} for '{category}' in {country}")]
    NonFiniteValue {
        chart: ChartKind,
        country: String,
        category: String,
        field: &'static str,
    },
}

pub type ChartOutcome<T> = Result<Chart<T>, ChartError>;

/// A bar-chart series; used by the Derivatives and Assets charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub title: &'static str,
    pub value_axis: &'static str,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub category: String,
    pub value: f64,
    /// Hex color, `#rrggbb`.
    pub color: &'static str,
}

/// Reject NaN/infinite measures before they reach sums or the renderer.
pub(crate) fn ensure_finite<'a, I>(
    chart: ChartKind,
    country: &str,
    field: &'static str,
    values: I,
) -> Result<(), ChartError>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    match values.into_iter().find(|(_, v)| !v.is_finite()) {
        Some((category, _)) => Err(ChartError::NonFiniteValue {
            chart,
            country: country.to_string(),
            category: category.to_string(),
            field,
        }),
        None => Ok(()),
    }
}
