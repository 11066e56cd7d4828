//! FundStats Pipeline — filter-aggregate stages behind the dashboard.
//!
//! - `metrics`: the twelve-caption summary panel for a (fund type, country) pair
//! - `charts`: one projector per chart, each returning `Empty` or a series
//! - `selection`: the versioned selection controller
//! - `pipeline`: snapshot-driven recomputation and the last-write-wins view

pub mod charts;
pub mod format;
pub mod metrics;
pub mod pipeline;
pub mod selection;

pub use charts::{
    Bar, BarSeries, Chart, ChartError, ChartKind, ChartOutcome, ChoroplethCell, GeoMap,
    ProportionSeries, ProportionSlice, RegionPoint,
};
pub use metrics::{metrics_panel, summarize, MetricsPanel, NavSummary};
pub use pipeline::{ApplyOutcome, ChartSet, DashboardUpdate, Pipeline, PublishedView};
pub use selection::{
    RecomputeScope, Selection, SelectionChange, SelectionController, SelectionError,
    SelectionSnapshot,
};
