#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line dashboard for fatal police shooting incidents.
//!
//! Loads records from a file or URL, runs them through the dashboard
//! pipeline, and prints the requested view: race statistics, a table
//! page, the map viewport, marker `GeoJSON`, or a CSV export.
//!
//! Uses `indicatif-log-bridge` (via [`incident_map_cli_utils::init_logger`])
//! so that log lines and the loading progress bar never fight for the
//! terminal.

mod config;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use incident_map_analytics::{Dashboard, sort_stats_by_count};
use incident_map_analytics_models::SortKey;
use incident_map_cli_utils::IndicatifProgress;
use incident_map_export::{ExportColumn, export_csv, write_csv_file};
use incident_map_geography_models::{STATE_CODES, StateFilter, state_name};
use incident_map_source::{DataState, FetchOptions, FileSource, HttpSource, IncidentSource};

use crate::config::{Config, DataLocation, Overrides};

#[derive(Parser)]
#[command(name = "incident_map", about = "Fatal police shooting dashboard")]
struct Cli {
    #[command(flatten)]
    data: DataArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// TOML config file (overrides `INCIDENT_MAP_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Load records from a local CSV or JSON file
    #[arg(long, global = true, conflicts_with = "url")]
    file: Option<PathBuf>,
    /// Load records from a URL (overrides `INCIDENT_MAP_DATA_URL`)
    #[arg(long, global = true)]
    url: Option<String>,
    /// Maximum number of raw records to read
    #[arg(long, global = true)]
    limit: Option<u64>,
    /// Two-letter state code, or "All"
    #[arg(long, global = true)]
    state: Option<StateFilter>,
    /// Case-insensitive search over victim name and city
    #[arg(long, global = true, default_value = "")]
    search: String,
    /// Column to sort by; repeat the same key to toggle descending
    #[arg(long = "sort", global = true, value_name = "KEY", value_parser = parse_sort_key)]
    sort: Vec<SortKey>,
    /// Rows per table page (overrides `INCIDENT_MAP_PAGE_SIZE`)
    #[arg(long, global = true)]
    page_size: Option<usize>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the race distribution of the loaded incidents
    Stats {
        /// Order categories by descending count instead of first appearance
        #[arg(long)]
        by_count: bool,
    },
    /// Show one page of the incident table
    Table {
        /// 1-based page number (clamped into range)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Export the filtered, sorted incidents as CSV
    Export {
        /// Output path (defaults to `incidents_<state>_<date>.csv`)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Comma-separated columns (e.g. `name,city,state,race`)
        #[arg(long, value_delimiter = ',', value_parser = parse_column)]
        columns: Vec<ExportColumn>,
        /// Print the document instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Show the map viewport for the filtered incidents
    Viewport,
    /// Write map markers for the filtered incidents as `GeoJSON`
    Markers {
        /// Output path (prints to stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the recognised state codes
    States,
}

fn parse_sort_key(value: &str) -> Result<SortKey, String> {
    value
        .parse()
        .map_err(|_| format!("unknown sort key '{value}'"))
}

fn parse_column(value: &str) -> Result<ExportColumn, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("unknown export column '{value}'"))
}

fn source_for(
    location: &DataLocation,
) -> Result<Box<dyn IncidentSource>, Box<dyn std::error::Error>> {
    Ok(match location {
        DataLocation::File(path) => Box::new(FileSource::new(path)),
        DataLocation::Url(url) => Box::new(HttpSource::new(url.as_str())?),
    })
}

#[allow(clippy::too_many_lines)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = incident_map_cli_utils::init_logger();
    let cli = Cli::parse();

    if matches!(cli.command, Commands::States) {
        for code in STATE_CODES {
            println!("{code:<4} {}", state_name(code));
        }
        return Ok(());
    }

    let config = Config::resolve(&Overrides {
        config: cli.data.config.clone(),
        data_url: cli.data.url.clone(),
        data_file: cli.data.file.clone(),
        page_size: cli.data.page_size,
        limit: cli.data.limit,
        state: cli.data.state.clone(),
    })?;
    log::debug!("Resolved config: {config:?}");

    let source = source_for(&config.location)?;
    let progress = IndicatifProgress::records_bar(&multi, "Loading incidents");
    let state = incident_map_source::load(
        source.as_ref(),
        &FetchOptions {
            limit: config.limit,
        },
        &progress,
    )
    .await;

    if let DataState::NoData { reason } = &state {
        eprintln!("No data available: {reason}");
    }

    let mut dashboard = Dashboard::new(config.page_size);
    dashboard.load(state.shared_records());
    dashboard.set_state_filter(config.state.clone());
    dashboard.set_search_term(cli.data.search.clone());
    for key in &cli.data.sort {
        dashboard.request_sort(*key);
    }

    match cli.command {
        Commands::Stats { by_count } => {
            let mut stats = dashboard.stats().to_vec();
            if by_count {
                sort_stats_by_count(&mut stats);
            }
            if cli.data.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render::stats_table(&stats, &config.state));
            }
        }
        Commands::Table { page } => {
            dashboard.set_page(page);
            let total = dashboard.result_count();
            let page = dashboard.page();
            if cli.data.json {
                let body = serde_json::json!({
                    "window": page.window,
                    "items": page.items,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", render::page_table(&page, total));
            }
        }
        Commands::Export {
            output,
            columns,
            stdout,
        } => {
            let document = if columns.is_empty() {
                dashboard.export_csv()
            } else {
                let rows = dashboard.filtered_sorted();
                export_csv(&rows, &columns, &dashboard.query().state)
            };

            if stdout {
                println!("{document}");
            } else {
                let path = output.unwrap_or_else(|| {
                    PathBuf::from(dashboard.export_filename(chrono::Utc::now().date_naive()))
                });
                write_csv_file(&path, &document)?;
                println!(
                    "Exported {} incidents to {}",
                    dashboard.result_count(),
                    path.display()
                );
            }
        }
        Commands::Viewport => {
            let viewport = dashboard.viewport();
            if cli.data.json {
                println!("{}", serde_json::to_string_pretty(&viewport)?);
            } else {
                println!("{}", render::viewport_summary(&viewport));
            }
        }
        Commands::Markers { output } => {
            let collection = incident_map_spatial::markers_geojson(&dashboard.filtered_sorted());
            let body = serde_json::to_string_pretty(&collection)?;
            if let Some(path) = output {
                std::fs::write(&path, body)?;
                log::info!(
                    "Wrote {} markers to {}",
                    collection.features.len(),
                    path.display()
                );
            } else {
                println!("{body}");
            }
        }
        Commands::States => {}
    }

    Ok(())
}
