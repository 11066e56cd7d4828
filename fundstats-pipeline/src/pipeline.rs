//! Recompute pipeline — snapshot in, dashboard update out.
//!
//! The metrics panel and the four charts are independent and can be
//! computed on the rayon pool. Results always come back in chart order
//! (Derivatives, Assets, Strategy, Geo) regardless of completion order.
//! [`PublishedView`] holds the last accepted update and refuses anything
//! older.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use fundstats_core::Dataset;

use crate::charts::{
    assets, derivatives, geo, strategy, BarSeries, ChartKind, ChartOutcome, GeoMap,
    ProportionSeries,
};
use crate::metrics::{metrics_panel, MetricsPanel};
use crate::selection::{RecomputeScope, Selection, SelectionSnapshot};

/// The four chart results for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub country: String,
    pub derivatives: ChartOutcome<BarSeries>,
    pub assets: ChartOutcome<BarSeries>,
    pub strategy: ChartOutcome<ProportionSeries>,
    pub geo: ChartOutcome<GeoMap>,
}

impl ChartSet {
    /// Per-chart failures, in chart order.
    pub fn errors(&self) -> Vec<(ChartKind, String)> {
        let mut out = Vec::new();
        if let Err(e) = &self.derivatives {
            out.push((ChartKind::Derivatives, e.to_string()));
        }
        if let Err(e) = &self.assets {
            out.push((ChartKind::Assets, e.to_string()));
        }
        if let Err(e) = &self.strategy {
            out.push((ChartKind::Strategy, e.to_string()));
        }
        if let Err(e) = &self.geo {
            out.push((ChartKind::Geo, e.to_string()));
        }
        out
    }
}

/// Result of one recomputation. `charts` is `None` for a metrics-only pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardUpdate {
    pub generation: u64,
    pub selection: Selection,
    pub metrics: MetricsPanel,
    pub charts: Option<ChartSet>,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    dataset: Arc<Dataset>,
    parallel: bool,
}

impl Pipeline {
    pub fn new(dataset: Arc<Dataset>, parallel: bool) -> Self {
        Self { dataset, parallel }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Compute every chart for `country`.
    pub fn charts(&self, country: &str) -> ChartSet {
        let ds = self.dataset.as_ref();
        let (derivatives, assets, strategy, geo) = if self.parallel {
            let ((d, a), (s, g)) = rayon::join(
                || {
                    rayon::join(
                        || derivatives::project(ds, country),
                        || assets::project(ds, country),
                    )
                },
                || {
                    rayon::join(
                        || strategy::project(ds, country),
                        || geo::project(ds, country),
                    )
                },
            );
            (d, a, s, g)
        } else {
            (
                derivatives::project(ds, country),
                assets::project(ds, country),
                strategy::project(ds, country),
                geo::project(ds, country),
            )
        };

        let set = ChartSet {
            country: country.to_string(),
            derivatives,
            assets,
            strategy,
            geo,
        };
        for (kind, message) in set.errors() {
            log::warn!("pipeline: {kind} chart failed: {message}");
        }
        set
    }

    /// Recompute the dashboard for one snapshot. Pure with respect to the
    /// dataset: the same snapshot always gives the same update.
    pub fn recompute(&self, snapshot: &SelectionSnapshot) -> DashboardUpdate {
        let started = Instant::now();
        let Selection { fund_type, country } = &snapshot.selection;
        let ds = self.dataset.as_ref();

        let (metrics, charts) = match snapshot.scope {
            RecomputeScope::MetricsOnly => (metrics_panel(ds, fund_type, country), None),
            RecomputeScope::Full if self.parallel => {
                let (m, c) = rayon::join(
                    || metrics_panel(ds, fund_type, country),
                    || self.charts(country),
                );
                (m, Some(c))
            }
            RecomputeScope::Full => (
                metrics_panel(ds, fund_type, country),
                Some(self.charts(country)),
            ),
        };

        log::debug!(
            "pipeline: gen {} ({:?}) recomputed in {:?}",
            snapshot.generation,
            snapshot.scope,
            started.elapsed()
        );

        DashboardUpdate {
            generation: snapshot.generation,
            selection: snapshot.selection.clone(),
            metrics,
            charts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Accepted,
    /// Metrics were older than the published ones, but the charts were newer
    /// than the charts on screen and replaced them.
    ChartsOnly,
    /// Older than what is already published; dropped.
    Stale,
}

/// Last-write-wins view of the dashboard.
///
/// Metrics and charts carry their own generations: a metrics-only update may
/// be newer than the charts on screen, which stay valid because they only
/// depend on the country. Each part is replaced only by a part at least as
/// new, so a full update overtaken by a metrics-only one still lands its
/// charts.
#[derive(Debug, Clone, Default)]
pub struct PublishedView {
    selection: Option<Selection>,
    metrics: Option<MetricsPanel>,
    charts: Option<ChartSet>,
    metrics_generation: Option<u64>,
    charts_generation: Option<u64>,
}

impl PublishedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: DashboardUpdate) -> ApplyOutcome {
        let generation = update.generation;
        let metrics_fresh = !self.metrics_generation.is_some_and(|g| generation < g);
        let charts_fresh = update.charts.is_some()
            && !self.charts_generation.is_some_and(|g| generation < g);

        if charts_fresh {
            self.charts_generation = Some(generation);
            self.charts = update.charts;
        }

        if !metrics_fresh {
            log::debug!(
                "pipeline: stale metrics gen {} (published {:?}), charts {}",
                generation,
                self.metrics_generation,
                if charts_fresh { "kept" } else { "dropped" }
            );
            return if charts_fresh {
                ApplyOutcome::ChartsOnly
            } else {
                ApplyOutcome::Stale
            };
        }

        self.metrics_generation = Some(generation);
        self.selection = Some(update.selection);
        self.metrics = Some(update.metrics);
        ApplyOutcome::Accepted
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn metrics(&self) -> Option<&MetricsPanel> {
        self.metrics.as_ref()
    }

    pub fn charts(&self) -> Option<&ChartSet> {
        self.charts.as_ref()
    }

    pub fn generation(&self) -> Option<u64> {
        self.metrics_generation
    }

    pub fn charts_generation(&self) -> Option<u64> {
        self.charts_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Chart;
    use fundstats_core::{DerivativeRecord, NavRecord, StrategyRecord, Tables};

    fn nav(fund_type: &str, country: &str, nav: f64) -> NavRecord {
        NavRecord {
            fund_type: fund_type.into(),
            country: country.into(),
            nav,
            fund_count: 10,
            gross_leverage_incl: 2.0,
            gross_leverage_excl: 1.0,
            synthetic_leverage: 0.5,
        }
    }

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_tables(Tables {
            nav: vec![
                nav("Hedge Funds", "Malta", 1.0),
                nav("Hedge Funds", "Cyprus", 3.0),
                nav("Open Ended Funds", "Malta", 2.0),
            ],
            derivatives: vec![
                DerivativeRecord {
                    country: "Malta".into(),
                    derivative: "FX".into(),
                    gross_notional_exposure: 1.0,
                },
                DerivativeRecord {
                    country: "Cyprus".into(),
                    derivative: "IR".into(),
                    gross_notional_exposure: f64::NAN,
                },
            ],
            strategy: vec![StrategyRecord {
                country: "Malta".into(),
                strategy: "Macro".into(),
                net_assets: 4.0,
            }],
            ..Tables::default()
        }))
    }

    fn snapshot(generation: u64, fund_type: &str, country: &str, scope: RecomputeScope) -> SelectionSnapshot {
        SelectionSnapshot {
            generation,
            selection: Selection {
                fund_type: fund_type.into(),
                country: country.into(),
            },
            scope,
        }
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let ds = dataset();
        let snap = snapshot(1, "Hedge Funds", "Malta", RecomputeScope::Full);
        let par = Pipeline::new(ds.clone(), true).recompute(&snap);
        let seq = Pipeline::new(ds, false).recompute(&snap);
        assert_eq!(par, seq);
    }

    #[test]
    fn metrics_only_skips_charts() {
        let pipeline = Pipeline::new(dataset(), true);
        let update =
            pipeline.recompute(&snapshot(2, "Open Ended Funds", "Malta", RecomputeScope::MetricsOnly));
        assert!(update.charts.is_none());
        assert_eq!(update.metrics.total_nav, "USD 2.0T");
        assert_eq!(update.generation, 2);
    }

    #[test]
    fn one_chart_failure_leaves_the_rest() {
        let pipeline = Pipeline::new(dataset(), false);
        let update = pipeline.recompute(&snapshot(1, "Hedge Funds", "Cyprus", RecomputeScope::Full));
        let charts = update.charts.unwrap();
        assert!(charts.derivatives.is_err());
        assert_eq!(
            charts.assets,
            Ok(Chart::Empty {
                title: "No Asset data for Cyprus".into()
            })
        );
        assert!(charts.strategy.as_ref().unwrap().is_empty());
        assert!(charts.geo.as_ref().unwrap().is_empty());
        assert_eq!(charts.errors().len(), 1);
        assert_eq!(charts.errors()[0].0, ChartKind::Derivatives);
        assert_eq!(update.metrics.country_nav, "USD 3.0T");
    }

    #[test]
    fn view_drops_older_generations() {
        let pipeline = Pipeline::new(dataset(), false);
        let mut view = PublishedView::new();
        let newer = pipeline.recompute(&snapshot(3, "Hedge Funds", "Cyprus", RecomputeScope::Full));
        let older = pipeline.recompute(&snapshot(2, "Hedge Funds", "Malta", RecomputeScope::Full));

        assert_eq!(view.apply(newer), ApplyOutcome::Accepted);
        assert_eq!(view.apply(older), ApplyOutcome::Stale);
        assert_eq!(view.generation(), Some(3));
        assert_eq!(view.selection().unwrap().country, "Cyprus");
        assert_eq!(view.charts().unwrap().country, "Cyprus");
    }

    #[test]
    fn equal_generation_is_accepted() {
        let pipeline = Pipeline::new(dataset(), false);
        let mut view = PublishedView::new();
        let snap = snapshot(1, "Hedge Funds", "Malta", RecomputeScope::Full);
        assert_eq!(view.apply(pipeline.recompute(&snap)), ApplyOutcome::Accepted);
        assert_eq!(view.apply(pipeline.recompute(&snap)), ApplyOutcome::Accepted);
    }

    #[test]
    fn metrics_only_update_keeps_charts() {
        let pipeline = Pipeline::new(dataset(), false);
        let mut view = PublishedView::new();
        view.apply(pipeline.recompute(&snapshot(1, "Hedge Funds", "Malta", RecomputeScope::Full)));
        view.apply(pipeline.recompute(&snapshot(
            2,
            "Open Ended Funds",
            "Malta",
            RecomputeScope::MetricsOnly,
        )));

        assert_eq!(view.generation(), Some(2));
        assert_eq!(view.charts_generation(), Some(1));
        assert_eq!(view.charts().unwrap().country, "Malta");
        assert_eq!(view.metrics().unwrap().label, "All OEFs*");
    }

    #[test]
    fn overtaken_full_update_still_lands_its_charts() {
        let pipeline = Pipeline::new(dataset(), false);
        let mut view = PublishedView::new();
        view.apply(pipeline.recompute(&snapshot(1, "Hedge Funds", "Malta", RecomputeScope::Full)));

        // Country change (gen 2) is still computing when a fund-type change
        // (gen 3) finishes first.
        let country_change =
            pipeline.recompute(&snapshot(2, "Hedge Funds", "Cyprus", RecomputeScope::Full));
        let fund_change = pipeline.recompute(&snapshot(
            3,
            "Open Ended Funds",
            "Cyprus",
            RecomputeScope::MetricsOnly,
        ));

        assert_eq!(view.apply(fund_change), ApplyOutcome::Accepted);
        assert_eq!(view.apply(country_change), ApplyOutcome::ChartsOnly);

        assert_eq!(view.generation(), Some(3));
        assert_eq!(view.charts_generation(), Some(2));
        assert_eq!(view.selection().unwrap().fund_type, "Open Ended Funds");
        assert_eq!(view.selection().unwrap().country, "Cyprus");
        assert_eq!(view.charts().unwrap().country, "Cyprus");
    }

    #[test]
    fn older_charts_never_replace_newer_ones() {
        let pipeline = Pipeline::new(dataset(), false);
        let mut view = PublishedView::new();
        view.apply(pipeline.recompute(&snapshot(4, "Hedge Funds", "Cyprus", RecomputeScope::Full)));
        let late = pipeline.recompute(&snapshot(2, "Hedge Funds", "Malta", RecomputeScope::Full));

        assert_eq!(view.apply(late), ApplyOutcome::Stale);
        assert_eq!(view.charts_generation(), Some(4));
        assert_eq!(view.charts().unwrap().country, "Cyprus");
    }
}
