//! Investment strategy chart: net assets grouped by strategy, as shares of the
//! country total.

use serde::Serialize;
use std::collections::BTreeMap;

use fundstats_core::domain::StrategyRecord;
use fundstats_core::Dataset;

use super::palette::STRATEGY;
use super::{ensure_finite, Chart, ChartKind, ChartOutcome};

pub const TITLE: &str = "Investment Strategy";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionSeries {
    pub title: &'static str,
    pub slices: Vec<ProportionSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionSlice {
    pub category: String,
    pub value: f64,
    /// Share of the country total, 0..=100.
    pub percent: f64,
    pub color: &'static str,
}

pub fn project(dataset: &Dataset, country: &str) -> ChartOutcome<ProportionSeries> {
    let empty = || Chart::Empty {
        title: format!("No strategy data for {country}"),
    };

    let slice = dataset.country_slice::<StrategyRecord>(country);
    if slice.is_empty() {
        return Ok(empty());
    }
    ensure_finite(
        ChartKind::Strategy,
        country,
        "Net Assets (USD)",
        slice.iter().map(|r| (r.strategy.as_str(), r.net_assets)),
    )?;

    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for r in &slice {
        *groups.entry(r.strategy.as_str()).or_insert(0.0) += r.net_assets;
    }
    let total: f64 = groups.values().sum();
    if total == 0.0 {
        return Ok(empty());
    }

    let slices = groups
        .into_iter()
        .enumerate()
        .map(|(i, (category, value))| ProportionSlice {
            category: category.to_string(),
            value,
            percent: value / total * 100.0,
            color: STRATEGY.color(i),
        })
        .collect();

    Ok(Chart::Series(ProportionSeries {
        title: TITLE,
        slices,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundstats_core::Tables;

    fn dataset(rows: &[(&str, &str, f64)]) -> Dataset {
        Dataset::from_tables(Tables {
            strategy: rows
                .iter()
                .map(|(country, strategy, v)| StrategyRecord {
                    country: (*country).into(),
                    strategy: (*strategy).into(),
                    net_assets: *v,
                })
                .collect(),
            ..Tables::default()
        })
    }

    #[test]
    fn duplicate_strategies_are_combined() {
        let ds = dataset(&[
            ("United States", "Long/Short", 60.0),
            ("United States", "Long/Short", 40.0),
            ("United States", "Macro", 100.0),
        ]);
        let chart = project(&ds, "United States").unwrap();
        let series = chart.series().unwrap();
        assert_eq!(series.title, "Investment Strategy");
        assert_eq!(series.slices.len(), 2);
        assert_eq!(series.slices[0].category, "Long/Short");
        assert_eq!(series.slices[0].value, 100.0);
        assert_eq!(series.slices[0].percent, 50.0);
        assert_eq!(series.slices[1].category, "Macro");
        assert_eq!(series.slices[1].percent, 50.0);
        assert_eq!(series.slices[0].color, "#000032");
        assert_eq!(series.slices[1].color, "#273261");
    }

    #[test]
    fn groups_sorted_by_name() {
        let ds = dataset(&[
            ("Malta", "Macro", 1.0),
            ("Malta", "Credit", 1.0),
            ("Malta", "Equity", 2.0),
        ]);
        let chart = project(&ds, "Malta").unwrap();
        let names: Vec<&str> = chart
            .series()
            .unwrap()
            .slices
            .iter()
            .map(|s| s.category.as_str())
            .collect();
        assert_eq!(names, ["Credit", "Equity", "Macro"]);
    }

    #[test]
    fn zero_total_gives_placeholder() {
        let ds = dataset(&[("Ireland", "Macro", 0.0)]);
        assert_eq!(
            project(&ds, "Ireland").unwrap(),
            Chart::Empty {
                title: "No strategy data for Ireland".into()
            }
        );
    }

    #[test]
    fn empty_slice_gives_placeholder() {
        let ds = dataset(&[("Ireland", "Macro", 5.0)]);
        assert!(project(&ds, "Malta").unwrap().is_empty());
    }
}
