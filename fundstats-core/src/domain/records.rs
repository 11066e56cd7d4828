//! Row types for the five source tables.
//!
//! Field renames are the header names of the published CSV files. The
//! synthetic leverage header is misspelt in the source data and is matched
//! as-is.

use serde::{Deserialize, Serialize};

/// One row of the NAV table: a (fund type, jurisdiction) aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavRecord {
    #[serde(rename = "FundType")]
    pub fund_type: String,
    #[serde(rename = "Country")]
    pub country: String,
    /// Net asset value in USD trillions.
    #[serde(rename = "NAV")]
    pub nav: f64,
    #[serde(rename = "No.")]
    pub fund_count: u64,
    #[serde(rename = "GrossLeverage(incl)")]
    pub gross_leverage_incl: f64,
    #[serde(rename = "GrossLeverage(excl)")]
    pub gross_leverage_excl: f64,
    #[serde(rename = "SyntheicLeverage")]
    pub synthetic_leverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivativeRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Derivative")]
    pub derivative: String,
    #[serde(rename = "GrossNotionalExposure")]
    pub gross_notional_exposure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "Country")]
    pub country: String,
    /// Asset class label, normally one of [`super::ASSET_ORDER`].
    #[serde(rename = "Asset")]
    pub asset: String,
    #[serde(rename = "GrossExposure")]
    pub gross_exposure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Strategy")]
    pub strategy: String,
    #[serde(rename = "Net Assets (USD)")]
    pub net_assets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    #[serde(rename = "Country")]
    pub country: String,
    /// Region display name, e.g. "Europe" or the "World" sentinel.
    #[serde(rename = "Label")]
    pub label: String,
    /// Country name, continent, or "World"; empty cells load as `None`.
    #[serde(rename = "Investment Area")]
    pub investment_area: Option<String>,
    #[serde(rename = "Amounts")]
    pub amount: f64,
}
