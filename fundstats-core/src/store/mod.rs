//! Dataset store — the five tables, loaded once and read-only afterwards.
//!
//! `Dataset` is shared between the render loop and the recompute worker as
//! `Arc<Dataset>`; nothing in it is mutable after construction.

pub mod load;
pub mod schema;

pub use load::{load_dataset, read_table, DataLoadError};
pub use schema::Table;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::{
    AssetRecord, DerivativeRecord, GeoRecord, NavRecord, Region, StrategyRecord,
    UnmappedRegionFault,
};

/// A row type that belongs to one of the five tables.
pub trait TableRow: DeserializeOwned + Send + Sync + 'static {
    const TABLE: Table;

    /// The table of this row type inside a dataset.
    fn rows(dataset: &Dataset) -> &[Self];

    /// The jurisdiction key every table carries.
    fn country(&self) -> &str;

    /// Feed the row's fields into the dataset fingerprint.
    fn hash_into(&self, hasher: &mut blake3::Hasher);
}

/// Raw tables before indexing. Loaders and tests build this, then call
/// [`Dataset::from_tables`].
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub nav: Vec<NavRecord>,
    pub derivatives: Vec<DerivativeRecord>,
    pub assets: Vec<AssetRecord>,
    pub strategy: Vec<StrategyRecord>,
    pub geo: Vec<GeoRecord>,
}

/// Row count per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowCounts {
    pub nav: usize,
    pub derivatives: usize,
    pub assets: usize,
    pub strategy: usize,
    pub geo: usize,
}

#[derive(Debug)]
pub struct Dataset {
    tables: Tables,
    fund_types: Vec<String>,
    countries: Vec<String>,
    fingerprint: String,
    region_report: Vec<UnmappedRegionFault>,
}

impl Dataset {
    /// Index the tables: selection domains, fingerprint and the unmapped-region report.
    pub fn from_tables(tables: Tables) -> Self {
        let fund_types = distinct_non_empty(tables.nav.iter().map(|r| r.fund_type.as_str()));
        let countries = distinct_non_empty(tables.nav.iter().map(|r| r.country.as_str()));
        let fingerprint = compute_fingerprint(&tables);
        let region_report = unmapped_regions(&tables.geo);

        for fault in &region_report {
            log::warn!("store: {fault}");
        }

        Self {
            tables,
            fund_types,
            countries,
            fingerprint,
            region_report,
        }
    }

    /// Rows of `T`'s table matching `predicate`, in table order.
    pub fn rows_for<T, P>(&self, predicate: P) -> Vec<&T>
    where
        T: TableRow,
        P: Fn(&T) -> bool,
    {
        T::rows(self).iter().filter(|row| predicate(*row)).collect()
    }

    /// Rows of `T`'s table for one jurisdiction. Unknown countries give an empty slice.
    pub fn country_slice<T: TableRow>(&self, country: &str) -> Vec<&T> {
        self.rows_for(|row: &T| row.country() == country)
    }

    /// Distinct `FundType` values of the NAV table, first-appearance order.
    pub fn fund_types(&self) -> &[String] {
        &self.fund_types
    }

    /// Distinct `Country` values of the NAV table, first-appearance order.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// BLAKE3 digest over every loaded row.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Geo rows whose label cannot be placed on the map, one entry per (country, label).
    pub fn region_report(&self) -> &[UnmappedRegionFault] {
        &self.region_report
    }

    pub fn row_counts(&self) -> RowCounts {
        RowCounts {
            nav: self.tables.nav.len(),
            derivatives: self.tables.derivatives.len(),
            assets: self.tables.assets.len(),
            strategy: self.tables.strategy.len(),
            geo: self.tables.geo.len(),
        }
    }
}

fn distinct_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if !v.is_empty() && seen.insert(v) {
            out.push(v.to_string());
        }
    }
    out
}

fn unmapped_regions(geo: &[GeoRecord]) -> Vec<UnmappedRegionFault> {
    let mut seen = HashSet::new();
    geo.iter()
        .filter(|r| Region::from_label(&r.label).is_none())
        .map(|r| UnmappedRegionFault {
            country: r.country.clone(),
            label: r.label.clone(),
        })
        .filter(|fault| seen.insert(fault.clone()))
        .collect()
}

/// Deterministic hash over all tables in a fixed table order.
fn compute_fingerprint(tables: &Tables) -> String {
    let mut hasher = blake3::Hasher::new();
    hash_table(&mut hasher, &tables.nav);
    hash_table(&mut hasher, &tables.derivatives);
    hash_table(&mut hasher, &tables.assets);
    hash_table(&mut hasher, &tables.strategy);
    hash_table(&mut hasher, &tables.geo);
    hasher.finalize().to_hex().to_string()
}

fn hash_table<T: TableRow>(hasher: &mut blake3::Hasher, rows: &[T]) {
    hasher.update(T::TABLE.name().as_bytes());
    hasher.update(&(rows.len() as u64).to_le_bytes());
    for row in rows {
        row.hash_into(hasher);
    }
}

fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    // Length prefix keeps ("ab","c") and ("a","bc") apart.
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

impl TableRow for NavRecord {
    const TABLE: Table = Table::Nav;

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.tables.nav
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hash_str(hasher, &self.fund_type);
        hash_str(hasher, &self.country);
        hasher.update(&self.nav.to_le_bytes());
        hasher.update(&self.fund_count.to_le_bytes());
        hasher.update(&self.gross_leverage_incl.to_le_bytes());
        hasher.update(&self.gross_leverage_excl.to_le_bytes());
        hasher.update(&self.synthetic_leverage.to_le_bytes());
    }
}

impl TableRow for DerivativeRecord {
    const TABLE: Table = Table::Derivatives;

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.tables.derivatives
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hash_str(hasher, &self.country);
        hash_str(hasher, &self.derivative);
        hasher.update(&self.gross_notional_exposure.to_le_bytes());
    }
}

impl TableRow for AssetRecord {
    const TABLE: Table = Table::Assets;

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.tables.assets
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hash_str(hasher, &self.country);
        hash_str(hasher, &self.asset);
        hasher.update(&self.gross_exposure.to_le_bytes());
    }
}

impl TableRow for StrategyRecord {
    const TABLE: Table = Table::Strategy;

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.tables.strategy
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hash_str(hasher, &self.country);
        hash_str(hasher, &self.strategy);
        hasher.update(&self.net_assets.to_le_bytes());
    }
}

impl TableRow for GeoRecord {
    const TABLE: Table = Table::Geo;

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.tables.geo
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hash_str(hasher, &self.country);
        hash_str(hasher, &self.label);
        match &self.investment_area {
            Some(area) => {
                hasher.update(&[1]);
                hash_str(hasher, area);
            }
            None => {
                hasher.update(&[0]);
            }
        }
        hasher.update(&self.amount.to_le_bytes());
    }
}
