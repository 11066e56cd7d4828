//! FundStats Core — record types, region lookup, dataset store, CSV loading.
//!
//! This crate holds everything the dashboard pipeline reads from:
//! - The five source tables (NAV, derivatives, assets, strategy, geo)
//! - Closed enumerations for regions, asset classes and fund types
//! - The immutable, shareable `Dataset` store and its selection domains
//! - Fail-fast CSV loading with column checks
//! - TOML configuration

pub mod config;
pub mod domain;
pub mod store;

pub use config::{ConfigError, DashboardConfig, TableFiles};
pub use domain::{
    AssetRecord, DerivativeRecord, GeoPoint, GeoRecord, NavRecord, Region, StrategyRecord,
    UnmappedRegionFault,
};
pub use store::{load_dataset, DataLoadError, Dataset, RowCounts, Table, TableRow, Tables};
