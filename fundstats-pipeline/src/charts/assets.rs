//! Assets chart: gross exposure per asset class, in canonical vocabulary order.

use fundstats_core::domain::{canonical_rank, AssetRecord};
use fundstats_core::Dataset;

use super::palette::ASSETS;
use super::{ensure_finite, Bar, BarSeries, Chart, ChartKind, ChartOutcome};

pub const TITLE: &str = "Assets";
pub const VALUE_AXIS: &str = "Gross Exposure (in USD)";

pub fn project(dataset: &Dataset, country: &str) -> ChartOutcome<BarSeries> {
    let mut slice = dataset.country_slice::<AssetRecord>(country);
    if slice.is_empty() {
        return Ok(Chart::Empty {
            title: format!("No Asset data for {country}"),
        });
    }
    ensure_finite(
        ChartKind::Assets,
        country,
        "GrossExposure",
        slice.iter().map(|r| (r.asset.as_str(), r.gross_exposure)),
    )?;

    // Unknown classes go last, in input order.
    slice.sort_by_key(|r| canonical_rank(&r.asset).unwrap_or(usize::MAX));

    let colors = ASSETS.assign(slice.iter().map(|r| r.asset.as_str()));
    let bars = slice
        .iter()
        .zip(colors)
        .map(|(r, color)| Bar {
            category: r.asset.clone(),
            value: r.gross_exposure,
            color,
        })
        .collect();

    Ok(Chart::Series(BarSeries {
        title: TITLE,
        value_axis: VALUE_AXIS,
        bars,
    }))
}
