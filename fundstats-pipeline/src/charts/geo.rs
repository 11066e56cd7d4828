//! Geo chart: region labels placed on a world map, with an optional
//! country-level choropleth.
//!
//! Shares are taken over the whole country slice. Rows whose label is not one
//! of the known regions still count toward the total but get no map point;
//! they come back as faults instead.

use serde::Serialize;

use fundstats_core::domain::{is_area_sentinel, GeoRecord};
use fundstats_core::{Dataset, GeoPoint, Region, UnmappedRegionFault};

use super::{ensure_finite, Chart, ChartKind, ChartOutcome};
use crate::format::thousands_rounded;

pub const TITLE: &str = "Geographical Investment Areas of Large Hedge Funds";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoMap {
    pub title: &'static str,
    /// One per placeable row, in region order.
    pub points: Vec<RegionPoint>,
    /// Present only when every named investment area is a single country.
    pub choropleth: Option<Vec<ChoroplethCell>>,
    pub faults: Vec<UnmappedRegionFault>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPoint {
    pub region: Region,
    /// `"Global: 25.0%"`
    pub label: String,
    pub tooltip: String,
    /// Fraction of the slice total, 0..=1.
    pub share: f64,
    pub amount: f64,
    pub position: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethCell {
    pub location: String,
    pub intensity: f64,
}

pub fn project(dataset: &Dataset, country: &str) -> ChartOutcome<GeoMap> {
    let slice = dataset.country_slice::<GeoRecord>(country);
    if slice.is_empty() {
        return Ok(Chart::Empty {
            title: format!("No geographic data for {country}"),
        });
    }
    ensure_finite(
        ChartKind::Geo,
        country,
        "Amounts",
        slice.iter().map(|r| (r.label.as_str(), r.amount)),
    )?;

    let total: f64 = slice.iter().map(|r| r.amount).sum();
    let share_of = |amount: f64| if total != 0.0 { amount / total } else { 0.0 };

    let mut points = Vec::with_capacity(slice.len());
    let mut faults = Vec::new();
    for r in &slice {
        let Some(region) = Region::from_label(&r.label) else {
            let fault = UnmappedRegionFault {
                country: r.country.clone(),
                label: r.label.clone(),
            };
            log::warn!("geo: {fault}");
            faults.push(fault);
            continue;
        };
        let share = share_of(r.amount);
        let name = region.display_name();
        let label = format!("{name}: {:.1}%", share * 100.0);
        let tooltip = format!(
            "{name}\nShare: {:.1}%\nAmount: {} USD",
            share * 100.0,
            thousands_rounded(r.amount)
        );
        points.push(RegionPoint {
            region,
            label,
            tooltip,
            share,
            amount: r.amount,
            position: region.coordinates(),
        });
    }
    points.sort_by_key(|p| p.region);

    Ok(Chart::Series(GeoMap {
        title: TITLE,
        points,
        choropleth: choropleth(&slice, share_of),
        faults,
    }))
}

fn choropleth(slice: &[&GeoRecord], share_of: impl Fn(f64) -> f64) -> Option<Vec<ChoroplethCell>> {
    let areas: Vec<(&str, f64)> = slice
        .iter()
        .filter_map(|r| r.investment_area.as_deref().map(|area| (area, r.amount)))
        .collect();
    if areas.is_empty() || areas.iter().any(|(area, _)| is_area_sentinel(area)) {
        return None;
    }
    Some(
        areas
            .into_iter()
            .map(|(area, amount)| ChoroplethCell {
                location: area.to_string(),
                intensity: share_of(amount).clamp(0.0, 1.0),
            })
            .collect(),
    )
}
