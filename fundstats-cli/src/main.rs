//! FundStats CLI — headless access to the dashboard computations.
//!
//! Commands:
//! - `summary` — metrics panel for one fund type and jurisdiction
//! - `charts` — the four chart results for one jurisdiction
//! - `list` — fund-type and country domains
//! - `validate` — load the data and report row counts, fingerprint and unmapped regions

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use fundstats_core::{load_dataset, DashboardConfig, Dataset, RowCounts, UnmappedRegionFault};
use fundstats_pipeline::{
    metrics_panel, summarize, BarSeries, Chart, ChartOutcome, ChartSet, GeoMap, MetricsPanel,
    NavSummary, Pipeline, ProportionSeries, SelectionChange, SelectionController,
};

#[derive(Parser)]
#[command(name = "fundstats", about = "FundStats CLI: fund statistics by jurisdiction")]
struct Cli {
    /// Path to a TOML config file. Defaults to <config dir>/fundstats/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the CSV tables. Overrides `data_dir` from the config.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metrics panel for a fund type and jurisdiction.
    Summary {
        /// Fund type (e.g., "Hedge Funds"). Defaults to the first fund type in the data.
        #[arg(long)]
        fund_type: Option<String>,

        /// Jurisdiction. Defaults to the first country in the data.
        #[arg(long)]
        country: Option<String>,

        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the Derivatives, Assets, Strategy and Geo charts for a jurisdiction.
    Charts {
        /// Jurisdiction. Defaults to the first country in the data.
        #[arg(long)]
        country: Option<String>,

        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the selectable fund types and countries.
    List {
        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load every table and report what was read.
    Validate {
        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let dataset = Arc::new(load_dataset(&config).with_context(|| {
        format!("loading dashboard data from {}", config.data_dir.display())
    })?);

    match cli.command {
        Commands::Summary {
            fund_type,
            country,
            json,
        } => run_summary(&dataset, fund_type, country, json),
        Commands::Charts { country, json } => run_charts(dataset, &config, country, json),
        Commands::List { json } => run_list(&dataset, json),
        Commands::Validate { json } => run_validate(&dataset, json),
    }
}

fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::resolve(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    log::debug!("cli: data dir {}", config.data_dir.display());
    Ok(config)
}

/// Start from the first value of each domain and apply whatever was given.
fn select(
    dataset: &Dataset,
    fund_type: Option<String>,
    country: Option<String>,
) -> Result<SelectionController> {
    let mut controller = SelectionController::new(dataset)?;
    if let Some(ft) = fund_type {
        controller.apply(SelectionChange::FundType(ft))?;
    }
    if let Some(c) = country {
        controller.apply(SelectionChange::Country(c))?;
    }
    Ok(controller)
}

#[derive(Serialize)]
struct SummaryReport {
    summary: NavSummary,
    panel: MetricsPanel,
}

fn run_summary(
    dataset: &Dataset,
    fund_type: Option<String>,
    country: Option<String>,
    json: bool,
) -> Result<()> {
    let controller = select(dataset, fund_type, country)?;
    let sel = controller.current();
    let report = SummaryReport {
        summary: summarize(dataset, &sel.fund_type, &sel.country),
        panel: metrics_panel(dataset, &sel.fund_type, &sel.country),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_panel(&sel.fund_type, &report.panel));
    }
    Ok(())
}

fn run_charts(
    dataset: Arc<Dataset>,
    config: &DashboardConfig,
    country: Option<String>,
    json: bool,
) -> Result<()> {
    let controller = select(&dataset, None, country)?;
    let country = controller.current().country.clone();
    let charts = Pipeline::new(dataset, config.parallel).charts(&country);

    if json {
        println!("{}", serde_json::to_string_pretty(&charts)?);
    } else {
        print!("{}", format_charts(&charts));
    }
    Ok(())
}

#[derive(Serialize)]
struct Domains<'a> {
    fund_types: &'a [String],
    countries: &'a [String],
}

fn run_list(dataset: &Dataset, json: bool) -> Result<()> {
    let domains = Domains {
        fund_types: dataset.fund_types(),
        countries: dataset.countries(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&domains)?);
        return Ok(());
    }

    println!("Fund types ({}):", domains.fund_types.len());
    for ft in domains.fund_types {
        println!("  {ft}");
    }
    println!("Countries ({}):", domains.countries.len());
    for c in domains.countries {
        println!("  {c}");
    }
    Ok(())
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    fingerprint: &'a str,
    rows: RowCounts,
    unmapped_regions: &'a [UnmappedRegionFault],
}

fn run_validate(dataset: &Dataset, json: bool) -> Result<()> {
    let report = ValidationReport {
        fingerprint: dataset.fingerprint(),
        rows: dataset.row_counts(),
        unmapped_regions: dataset.region_report(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_validation(&report));
    }
    Ok(())
}

fn format_panel(fund_type: &str, panel: &MetricsPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{fund_type} / {}", panel.country);
    let _ = writeln!(out, "{}", "-".repeat(50));
    let _ = writeln!(out, "{}", panel.label);
    let _ = writeln!(out, "{:<48} {}", "Total NAV", panel.total_nav);
    let _ = writeln!(out, "{:<48} {}", "Total Funds", panel.total_funds);
    let _ = writeln!(out, "{}", panel.jurisdictions);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", panel.country);
    let _ = writeln!(out, "{:<48} {}", panel.country_nav, panel.country_nav_share);
    let _ = writeln!(out, "{:<48} {}", panel.country_funds, panel.country_funds_share);
    let _ = writeln!(
        out,
        "{:<48} {}",
        "Gross Leverage (incl. IR and FX Derivatives)", panel.leverage_incl
    );
    let _ = writeln!(
        out,
        "{:<48} {}",
        "Gross Leverage (excl. IR and FX Derivatives)", panel.leverage_excl
    );
    let _ = writeln!(out, "{:<48} {}", "Synthetic Leverage", panel.synthetic_leverage);
    out
}

/// Title line for a chart that has nothing to draw, or `None` for a series.
fn placeholder<T>(outcome: &ChartOutcome<T>) -> Option<String> {
    match outcome {
        Ok(Chart::Empty { title }) => Some(format!("{title}\n")),
        Ok(Chart::Series(_)) => None,
        Err(e) => Some(format!("error: {e}\n")),
    }
}

fn format_bars(out: &mut String, outcome: &ChartOutcome<BarSeries>) {
    if let Some(text) = placeholder(outcome) {
        out.push_str(&text);
        return;
    }
    let Ok(Chart::Series(series)) = outcome else {
        return;
    };
    let _ = writeln!(out, "{} [{}]", series.title, series.value_axis);
    for bar in &series.bars {
        let _ = writeln!(out, "  {:<28} {:>12.2}  {}", bar.category, bar.value, bar.color);
    }
}

fn format_strategy(out: &mut String, outcome: &ChartOutcome<ProportionSeries>) {
    if let Some(text) = placeholder(outcome) {
        out.push_str(&text);
        return;
    }
    let Ok(Chart::Series(series)) = outcome else {
        return;
    };
    let _ = writeln!(out, "{}", series.title);
    for slice in &series.slices {
        let _ = writeln!(
            out,
            "  {:<28} {:>12.2} {:>6.1}%  {}",
            slice.category, slice.value, slice.percent, slice.color
        );
    }
}

fn format_geo(out: &mut String, outcome: &ChartOutcome<GeoMap>) {
    if let Some(text) = placeholder(outcome) {
        out.push_str(&text);
        return;
    }
    let Ok(Chart::Series(map)) = outcome else {
        return;
    };
    let _ = writeln!(out, "{}", map.title);
    for point in &map.points {
        let _ = writeln!(
            out,
            "  {:<28} ({:>7.2}, {:>7.2})",
            point.label, point.position.lat, point.position.lon
        );
    }
    if let Some(cells) = &map.choropleth {
        let _ = writeln!(out, "  Investment areas:");
        for cell in cells {
            let _ = writeln!(out, "    {:<26} {:>5.2}", cell.location, cell.intensity);
        }
    }
    for fault in &map.faults {
        let _ = writeln!(out, "  unplaced: {fault}");
    }
}

fn format_charts(charts: &ChartSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", charts.country);
    let _ = writeln!(out, "{}", "=".repeat(50));
    format_bars(&mut out, &charts.derivatives);
    out.push('\n');
    format_bars(&mut out, &charts.assets);
    out.push('\n');
    format_strategy(&mut out, &charts.strategy);
    out.push('\n');
    format_geo(&mut out, &charts.geo);
    out
}

fn format_validation(report: &ValidationReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Fingerprint: {}", report.fingerprint);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<14} {:>8}", "Table", "Rows");
    let _ = writeln!(out, "{}", "-".repeat(23));
    for (name, rows) in [
        ("nav", report.rows.nav),
        ("derivatives", report.rows.derivatives),
        ("assets", report.rows.assets),
        ("strategy", report.rows.strategy),
        ("geo", report.rows.geo),
    ] {
        let _ = writeln!(out, "{name:<14} {rows:>8}");
    }
    let _ = writeln!(out);
    if report.unmapped_regions.is_empty() {
        let _ = writeln!(out, "All region labels have a map position.");
    } else {
        let _ = writeln!(out, "Unmapped regions ({}):", report.unmapped_regions.len());
        for fault in report.unmapped_regions {
            let _ = writeln!(out, "  {fault}");
        }
    }
    out
}
