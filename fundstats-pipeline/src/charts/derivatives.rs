//! Derivatives chart: gross notional exposure per derivative type.

use fundstats_core::domain::DerivativeRecord;
use fundstats_core::Dataset;

use super::palette::DERIVATIVES;
use super::{ensure_finite, Bar, BarSeries, Chart, ChartKind, ChartOutcome};

pub const TITLE: &str = "Derivatives";
pub const VALUE_AXIS: &str = "Gross Notional Exposure (in USD)";

pub fn project(dataset: &Dataset, country: &str) -> ChartOutcome<BarSeries> {
    let mut slice = dataset.country_slice::<DerivativeRecord>(country);
    if slice.is_empty() {
        return Ok(Chart::Empty {
            title: format!("No Derivatives data for {country}"),
        });
    }
    ensure_finite(
        ChartKind::Derivatives,
        country,
        "GrossNotionalExposure",
        slice
            .iter()
            .map(|r| (r.derivative.as_str(), r.gross_notional_exposure)),
    )?;

    // Vec::sort_by is stable.
    slice.sort_by(|a, b| a.derivative.cmp(&b.derivative));

    let colors = DERIVATIVES.assign(slice.iter().map(|r| r.derivative.as_str()));
    let bars = slice
        .iter()
        .zip(colors)
        .map(|(r, color)| Bar {
            category: r.derivative.clone(),
            value: r.gross_notional_exposure,
            color,
        })
        .collect();

    Ok(Chart::Series(BarSeries {
        title: TITLE,
        value_axis: VALUE_AXIS,
        bars,
    }))
}
