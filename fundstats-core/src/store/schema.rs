use serde::Serialize;
use std::fmt;

/// The five source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Table {
    Nav,
    Derivatives,
    Assets,
    Strategy,
    Geo,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Nav,
        Table::Derivatives,
        Table::Assets,
        Table::Strategy,
        Table::Geo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Nav => "nav",
            Table::Derivatives => "derivatives",
            Table::Assets => "assets",
            Table::Strategy => "strategy",
            Table::Geo => "geo",
        }
    }

    /// Header names that must be present for the table to load.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Table::Nav => &[
                "FundType",
                "Country",
                "NAV",
                "No.",
                "GrossLeverage(incl)",
                "GrossLeverage(excl)",
                "SyntheicLeverage",
            ],
            Table::Derivatives => &["Country", "Derivative", "GrossNotionalExposure"],
            Table::Assets => &["Country", "Asset", "GrossExposure"],
            Table::Strategy => &["Country", "Strategy", "Net Assets (USD)"],
            Table::Geo => &["Country", "Label", "Investment Area", "Amounts"],
        }
    }

    /// Columns a row is keyed by. Rows with a blank key cannot be selected
    /// and are skipped at load.
    pub fn key_columns(self) -> &'static [&'static str] {
        match self {
            Table::Nav => &["FundType", "Country"],
            _ => &["Country"],
        }
    }

    /// First required column missing from `headers`, if any.
    pub fn missing_column<'h, I>(self, headers: I) -> Option<&'static str>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let present: Vec<&str> = headers.into_iter().collect();
        self.required_columns()
            .iter()
            .copied()
            .find(|col| !present.contains(col))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
