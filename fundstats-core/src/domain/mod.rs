//! Domain types: source records and the closed enumerations the charts depend on.

pub mod asset_class;
pub mod fund_type;
pub mod records;
pub mod region;

pub use asset_class::{canonical_rank, ASSET_ORDER};
pub use fund_type::{panel_label, FundKind};
pub use records::{AssetRecord, DerivativeRecord, GeoRecord, NavRecord, StrategyRecord};
pub use region::{is_area_sentinel, GeoPoint, Region, UnmappedRegionFault};
