//! CSV loading for the five tables.
//!
//! Loading is fail-fast: a missing file, a missing required column or a row
//! that does not parse stops startup with a [`DataLoadError`]. Column checks run
//! against the header row before any record is read.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::store::{Dataset, Table, TableRow, Tables};

/// Errors from loading the source tables. All of them are fatal.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {table} table at {}: {source}", path.display())]
    Io {
        table: Table,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: Table, column: &'static str },

    #[error("{table} table, line {line}: {message}")]
    MalformedRow {
        table: Table,
        line: u64,
        message: String,
    },
}

impl DataLoadError {
    fn from_csv(table: Table, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        DataLoadError::MalformedRow {
            table,
            line,
            message: err.to_string(),
        }
    }
}

/// Parse one table from any reader. Headers are trimmed and checked against
/// [`Table::required_columns`]; extra columns are ignored. Rows with a blank
/// [`Table::key_columns`] cell are skipped with a warning.
pub fn read_table<T: TableRow, R: Read>(reader: R) -> Result<Vec<T>, DataLoadError> {
    let table = T::TABLE;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| DataLoadError::from_csv(table, e))?
        .clone();
    if let Some(column) = table.missing_column(headers.iter()) {
        return Err(DataLoadError::MissingColumn { table, column });
    }
    let keys: Vec<usize> = table
        .key_columns()
        .iter()
        .filter_map(|key| headers.iter().position(|h| h == *key))
        .collect();

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    while rdr
        .read_record(&mut record)
        .map_err(|e| DataLoadError::from_csv(table, e))?
    {
        let line = record.position().map_or(0, |p| p.line());
        if keys.iter().any(|&i| record.get(i).map_or(true, str::is_empty)) {
            log::warn!("load: {table} table, line {line}: blank key column, row skipped");
            continue;
        }
        let row = record
            .deserialize(Some(&headers))
            .map_err(|e| DataLoadError::MalformedRow {
                table,
                line,
                message: e.to_string(),
            })?;
        rows.push(row);
    }
    Ok(rows)
}

fn read_table_file<T: TableRow>(path: &Path) -> Result<Vec<T>, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        table: T::TABLE,
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_table::<T, _>(file)?;
    log::info!(
        "load: {} table: {} rows from {}",
        T::TABLE,
        rows.len(),
        path.display()
    );
    Ok(rows)
}

/// Load all five tables from the locations named in `config`.
pub fn load_dataset(config: &DashboardConfig) -> Result<Dataset, DataLoadError> {
    let tables = Tables {
        nav: read_table_file(&config.table_path(Table::Nav))?,
        derivatives: read_table_file(&config.table_path(Table::Derivatives))?,
        assets: read_table_file(&config.table_path(Table::Assets))?,
        strategy: read_table_file(&config.table_path(Table::Strategy))?,
        geo: read_table_file(&config.table_path(Table::Geo))?,
    };
    let dataset = Dataset::from_tables(tables);
    log::info!(
        "load: dataset ready: {} fund types, {} countries, fingerprint {}",
        dataset.fund_types().len(),
        dataset.countries().len(),
        &dataset.fingerprint()[..12]
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoRecord, NavRecord, StrategyRecord};

    #[test]
    fn reads_nav_rows() {
        let csv = "FundType,Country,NAV,No.,GrossLeverage(incl),GrossLeverage(excl),SyntheicLeverage\n\
                   Hedge Funds,United States,10.5,500,5.2,2.1,1.3\n\
                   Hedge Funds,Ireland,1.25,80,3.0,1.5,0.9\n";
        let rows: Vec<NavRecord> = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fund_type, "Hedge Funds");
        assert_eq!(rows[0].fund_count, 500);
        assert_eq!(rows[1].nav, 1.25);
        assert_eq!(rows[1].synthetic_leverage, 0.9);
    }

    #[test]
    fn missing_column_fails_before_rows() {
        let csv = "Country,Strategy\nIreland,Macro\n";
        let err = read_table::<StrategyRecord, _>(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::MissingColumn { table, column } => {
                assert_eq!(table, Table::Strategy);
                assert_eq!(column, "Net Assets (USD)");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn headers_are_trimmed() {
        let csv = " Country , Strategy , Net Assets (USD) \nIreland, Macro ,12.5\n";
        let rows: Vec<StrategyRecord> = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].strategy, "Macro");
        assert_eq!(rows[0].net_assets, 12.5);
    }

    #[test]
    fn empty_investment_area_is_none() {
        let csv = "Country,Label,Investment Area,Amounts\n\
                   Ireland,World,,100\n\
                   Ireland,Europe,France,50\n";
        let rows: Vec<GeoRecord> = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].investment_area, None);
        assert_eq!(rows[1].investment_area.as_deref(), Some("France"));
    }

    #[test]
    fn malformed_number_reports_line() {
        let csv = "Country,Strategy,Net Assets (USD)\nIreland,Macro,12\nIreland,Credit,lots\n";
        let err = read_table::<StrategyRecord, _>(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::MalformedRow { table, line, .. } => {
                assert_eq!(table, Table::Strategy);
                assert_eq!(line, 3);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn rows_without_fund_type_or_country_are_skipped() {
        let csv = "FundType,Country,NAV,No.,GrossLeverage(incl),GrossLeverage(excl),SyntheicLeverage\n\
                   Hedge Funds,Malta,1.5,20,2.0,1.0,0.5\n\
                   ,,,,,,\n\
                   Hedge Funds,,,,,,\n\
                   ,Malta,,,,,\n";
        let rows: Vec<NavRecord> = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Malta");
    }

    #[test]
    fn blank_number_in_keyed_row_is_malformed() {
        let csv = "FundType,Country,NAV,No.,GrossLeverage(incl),GrossLeverage(excl),SyntheicLeverage\n\
                   Hedge Funds,Malta,1.5,20,2.0,1.0,0.5\n\
                   Hedge Funds,Cyprus,,20,2.0,1.0,0.5\n";
        let err = read_table::<NavRecord, _>(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MalformedRow { table: Table::Nav, line: 3, .. }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut config = DashboardConfig::default();
        config.data_dir = PathBuf::from("/nonexistent/fundstats");
        let err = load_dataset(&config).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { table: Table::Nav, .. }));
        assert!(err.to_string().contains("nav table"));
    }
}
