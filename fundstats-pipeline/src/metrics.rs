//! Metrics aggregator — the summary panel for one (fund type, country) pair.
//!
//! Two filters over the NAV table:
//! - `filtered`: rows of the selected fund type
//! - `country slice`: rows of `filtered` for the selected country
//!
//! Totals come from `filtered`, country figures and leverage means from the
//! slice. Zero totals give a 0% share and an empty slice gives 0.0 leverage;
//! neither case is an error.

use serde::Serialize;
use std::collections::HashSet;

use fundstats_core::domain::{panel_label, NavRecord};
use fundstats_core::Dataset;

use crate::format::{leverage_caption, nav_caption, pct_caption, share_pct, thousands};

/// Numeric summary behind the panel captions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavSummary {
    pub fund_type: String,
    pub country: String,
    pub total_nav: f64,
    pub total_funds: u64,
    pub country_nav: f64,
    pub country_funds: u64,
    /// Percent of `total_nav`; 0.0 when `total_nav` is zero.
    pub pct_nav: f64,
    /// Percent of `total_funds`; 0.0 when `total_funds` is zero.
    pub pct_funds: f64,
    pub leverage_incl: f64,
    pub leverage_excl: f64,
    pub synthetic_leverage: f64,
    pub reporting_jurisdictions: usize,
}

/// The twelve pre-formatted captions of the metrics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsPanel {
    pub label: String,
    pub jurisdictions: String,
    pub total_nav: String,
    pub total_funds: String,
    pub country: String,
    pub country_nav: String,
    pub country_nav_share: String,
    pub country_funds: String,
    pub country_funds_share: String,
    pub leverage_incl: String,
    pub leverage_excl: String,
    pub synthetic_leverage: String,
}

/// Mean of `f` over `rows`, 0.0 for an empty slice.
fn mean_or_zero(rows: &[&NavRecord], f: impl Fn(&NavRecord) -> f64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|&r| f(r)).sum::<f64>() / rows.len() as f64
}

pub fn summarize(dataset: &Dataset, fund_type: &str, country: &str) -> NavSummary {
    let filtered: Vec<&NavRecord> = dataset.rows_for(|r: &NavRecord| r.fund_type == fund_type);
    let slice: Vec<&NavRecord> = filtered
        .iter()
        .copied()
        .filter(|r| r.country == country)
        .collect();

    let total_nav: f64 = filtered.iter().map(|r| r.nav).sum();
    let total_funds: u64 = filtered.iter().map(|r| r.fund_count).sum();
    let country_nav: f64 = slice.iter().map(|r| r.nav).sum();
    let country_funds: u64 = slice.iter().map(|r| r.fund_count).sum();

    let reporting_jurisdictions = filtered
        .iter()
        .map(|r| r.country.as_str())
        .collect::<HashSet<_>>()
        .len();

    NavSummary {
        fund_type: fund_type.to_string(),
        country: country.to_string(),
        total_nav,
        total_funds,
        country_nav,
        country_funds,
        pct_nav: share_pct(country_nav, total_nav),
        pct_funds: share_pct(country_funds as f64, total_funds as f64),
        leverage_incl: mean_or_zero(&slice, |r| r.gross_leverage_incl),
        leverage_excl: mean_or_zero(&slice, |r| r.gross_leverage_excl),
        synthetic_leverage: mean_or_zero(&slice, |r| r.synthetic_leverage),
        reporting_jurisdictions,
    }
}

impl From<&NavSummary> for MetricsPanel {
    fn from(s: &NavSummary) -> Self {
        Self {
            label: panel_label(&s.fund_type).to_string(),
            jurisdictions: format!("* For {} Reporting Jurisdictions", s.reporting_jurisdictions),
            total_nav: nav_caption(s.total_nav),
            total_funds: format!("{} Funds", thousands(s.total_funds)),
            country: s.country.clone(),
            country_nav: nav_caption(s.country_nav),
            country_nav_share: format!("{} of Total Nav", pct_caption(s.country_nav, s.total_nav)),
            country_funds: format!("{} Funds", s.country_funds),
            country_funds_share: format!(
                "{} of Total Funds",
                pct_caption(s.country_funds as f64, s.total_funds as f64)
            ),
            leverage_incl: leverage_caption(s.leverage_incl),
            leverage_excl: leverage_caption(s.leverage_excl),
            synthetic_leverage: leverage_caption(s.synthetic_leverage),
        }
    }
}

/// Summary panel for the selection.
pub fn metrics_panel(dataset: &Dataset, fund_type: &str, country: &str) -> MetricsPanel {
    MetricsPanel::from(&summarize(dataset, fund_type, country))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundstats_core::Tables;

    fn row(fund_type: &str, country: &str, nav: f64, funds: u64, lev: f64) -> NavRecord {
        NavRecord {
            fund_type: fund_type.into(),
            country: country.into(),
            nav,
            fund_count: funds,
            gross_leverage_incl: lev,
            gross_leverage_excl: lev / 2.0,
            synthetic_leverage: lev / 4.0,
        }
    }

    fn dataset(nav: Vec<NavRecord>) -> Dataset {
        Dataset::from_tables(Tables {
            nav,
            ..Tables::default()
        })
    }

    #[test]
    fn hedge_fund_us_example() {
        let ds = dataset(vec![
            row("Hedge Funds", "United States", 10.0, 500, 6.0),
            row("Hedge Funds", "United Kingdom", 25.0, 900, 5.0),
            row("Hedge Funds", "Ireland", 15.0, 600, 4.0),
            row("Open Ended Funds", "United States", 30.0, 9000, 1.2),
        ]);
        let panel = metrics_panel(&ds, "Hedge Funds", "United States");
        assert_eq!(panel.label, "All QHFs*");
        assert_eq!(panel.jurisdictions, "* For 3 Reporting Jurisdictions");
        assert_eq!(panel.total_nav, "USD 50.0T");
        assert_eq!(panel.total_funds, "2,000 Funds");
        assert_eq!(panel.country, "United States");
        assert_eq!(panel.country_nav, "USD 10.0T");
        assert_eq!(panel.country_nav_share, "20.0% of Total Nav");
        assert_eq!(panel.country_funds, "500 Funds");
        assert_eq!(panel.country_funds_share, "25.0% of Total Funds");
        assert_eq!(panel.leverage_incl, "6.00x NAV");
        assert_eq!(panel.leverage_excl, "3.00x NAV");
        assert_eq!(panel.synthetic_leverage, "1.50x NAV");
    }

    #[test]
    fn leverage_is_mean_over_slice() {
        let ds = dataset(vec![
            row("Hedge Funds", "Ireland", 1.0, 10, 2.0),
            row("Hedge Funds", "Ireland", 1.0, 10, 4.0),
        ]);
        let s = summarize(&ds, "Hedge Funds", "Ireland");
        assert_eq!(s.leverage_incl, 3.0);
        assert_eq!(s.country_funds, 20);
        assert_eq!(s.reporting_jurisdictions, 1);
    }

    #[test]
    fn empty_country_slice_gives_zero_leverage() {
        let ds = dataset(vec![row("Hedge Funds", "Ireland", 5.0, 10, 2.0)]);
        let s = summarize(&ds, "Hedge Funds", "Atlantis");
        assert_eq!(s.leverage_incl, 0.0);
        assert_eq!(s.leverage_excl, 0.0);
        assert_eq!(s.synthetic_leverage, 0.0);
        assert!(!s.leverage_incl.is_nan());
        assert_eq!(s.pct_nav, 0.0);

        let panel = MetricsPanel::from(&s);
        assert_eq!(panel.leverage_incl, "0.00x NAV");
        assert_eq!(panel.country_nav_share, "0.0% of Total Nav");
    }

    #[test]
    fn unknown_fund_type_has_empty_label_and_zero_shares() {
        let ds = dataset(vec![row("Hedge Funds", "Ireland", 5.0, 10, 2.0)]);
        let s = summarize(&ds, "Money Market Funds", "Ireland");
        assert_eq!(s.total_nav, 0.0);
        assert_eq!(s.total_funds, 0);
        assert_eq!(s.pct_nav, 0.0);
        assert_eq!(s.pct_funds, 0.0);
        assert_eq!(s.reporting_jurisdictions, 0);

        let panel = MetricsPanel::from(&s);
        assert_eq!(panel.label, "");
        assert_eq!(panel.country_nav_share, "0% of Total Nav");
        assert_eq!(panel.country_funds_share, "0% of Total Funds");
        assert_eq!(panel.total_funds, "0 Funds");
    }

    #[test]
    fn summary_is_pure() {
        let ds = dataset(vec![
            row("Hedge Funds", "Ireland", 5.0, 10, 2.0),
            row("Hedge Funds", "Malta", 1.0, 3, 1.0),
        ]);
        assert_eq!(
            summarize(&ds, "Hedge Funds", "Malta"),
            summarize(&ds, "Hedge Funds", "Malta")
        );
    }
}
