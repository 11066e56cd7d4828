//! Dashboard configuration, read from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration pointing at `./data`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::store::Table;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// File name of each source table inside `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub nav: String,
    pub derivatives: String,
    pub assets: String,
    pub strategy: String,
    pub geo: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            nav: "nav.csv".into(),
            derivatives: "derivatives.csv".into(),
            assets: "assets.csv".into(),
            strategy: "investmentstrategy.csv".into(),
            geo: "geo.csv".into(),
        }
    }
}

impl TableFiles {
    pub fn file_for(&self, table: Table) -> &str {
        match table {
            Table::Nav => &self.nav,
            Table::Derivatives => &self.derivatives,
            Table::Assets => &self.assets,
            Table::Strategy => &self.strategy,
            Table::Geo => &self.geo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the five CSV files.
    pub data_dir: PathBuf,
    pub files: TableFiles,
    /// Run the metrics panel and the four charts on the rayon pool.
    pub parallel: bool,
    /// Log destination for the terminal dashboard (stderr is taken by the UI).
    pub log_file: PathBuf,
    /// Initial fund type; falls back to the first fund type in the data.
    pub default_fund_type: Option<String>,
    /// Initial jurisdiction; falls back to the first country in the data.
    pub default_country: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            files: TableFiles::default(),
            parallel: true,
            log_file: PathBuf::from("fundstats-tui.log"),
            default_fund_type: None,
            default_country: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/fundstats/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fundstats").join("config.toml"))
    }

    /// An explicit path must exist; otherwise the default path is used when
    /// present, and built-in defaults when not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("config: using {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.data_dir.join(self.files.file_for(table))
    }
}
