use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use demo_dashboard_data::{
    config::{self, AppConfig},
    generators::{CustomerGenerator, EntityGenerator, EntityKind, OrderGenerator, StockGenerator},
    services::{write_export, DashboardDataset},
    NumberLocale,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config().context("failed to load application config")?;
    config::init_tracing(config.log_level(), config.log_json);

    match cli.command {
        Commands::Kpi(args) => handle_kpi(&config, args)?,
        Commands::Export(args) => handle_export(&config, args)?,
        Commands::Sample(args) => handle_sample(&config, args)?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "dashboard-data",
    about = "Generate demo dashboard datasets, KPIs and table exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the month-over-month KPIs of a generated dataset
    Kpi(KpiArgs),
    /// Write generated collections as quoted CSV files
    Export(ExportArgs),
    /// Print generated records as JSON
    Sample(SampleArgs),
}

#[derive(Args)]
struct KpiArgs {
    /// Records per collection (defaults to the configured dashboard length)
    #[arg(long)]
    length: Option<usize>,
    /// Display locale, overriding the configured one
    #[arg(long, value_parser = parse_locale)]
    locale: Option<NumberLocale>,
    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Render the report as pretty JSON"
    )]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    #[arg(value_enum)]
    target: ExportTarget,
    #[arg(long)]
    length: Option<usize>,
    /// Output directory (defaults to the configured export directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct SampleArgs {
    #[arg(value_enum)]
    kind: EntityKind,
    #[arg(long, default_value_t = 5)]
    length: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    Orders,
    Customers,
    Stocks,
    All,
}

impl ExportTarget {
    fn kinds(self) -> Vec<EntityKind> {
        match self {
            ExportTarget::Orders => vec![EntityKind::Orders],
            ExportTarget::Customers => vec![EntityKind::Customers],
            ExportTarget::Stocks => vec![EntityKind::Stocks],
            ExportTarget::All => EntityKind::iter().collect(),
        }
    }
}

fn parse_locale(raw: &str) -> Result<NumberLocale, String> {
    raw.parse()
        .map_err(|_| format!("unsupported locale '{raw}', expected ja-JP or en-US"))
}

fn handle_kpi(config: &AppConfig, args: KpiArgs) -> Result<()> {
    let length = args.length.unwrap_or(config.dashboard_length);
    let locale = args.locale.unwrap_or_else(|| config.number_locale());
    let dataset = DashboardDataset::generate_with(&config.calendar, length);
    let report = dataset.kpis(locale);

    if args.json {
        return print_json(&report);
    }

    for metric in [&report.orders, &report.stocks, &report.customers] {
        println!(
            "- {}: {} ({} {})",
            metric.title, metric.value, metric.trend.label, metric.trend.value
        );
    }
    Ok(())
}

fn handle_export(config: &AppConfig, args: ExportArgs) -> Result<()> {
    let length = args.length.unwrap_or(config.dashboard_length);
    let out_dir = args.out.unwrap_or_else(|| config.export_dir.clone());
    let dataset = DashboardDataset::generate_with(&config.calendar, length);

    for kind in args.target.kinds() {
        let table = dataset
            .export(kind)
            .with_context(|| format!("failed to export {kind}"))?;
        let path = write_export(&out_dir, &kind.csv_filename(), &table)
            .with_context(|| format!("failed to write {kind} export to {}", out_dir.display()))?;
        println!("{}", path.display());
    }

    info!(length, dir = %out_dir.display(), "export finished");
    Ok(())
}

fn handle_sample(config: &AppConfig, args: SampleArgs) -> Result<()> {
    let calendar = &config.calendar;
    match args.kind {
        EntityKind::Orders => print_json(&OrderGenerator::generate_with(calendar, args.length)),
        EntityKind::Stocks => print_json(&StockGenerator::generate_with(calendar, args.length)),
        EntityKind::Customers => {
            print_json(&CustomerGenerator::generate_with(calendar, args.length))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
