//! # groupnorm
//!
//! Normalizes the group workbook into canonical entities and writes a dry-run preview report.
//! Nothing is written to any store; the optional NDJSON export is the input for a separate
//! commit step.
//!
//! ## Usage
//!
//! ```
//! # Preview a workbook, writing preview_report.json
//! cargo run -- preview data/groups.xlsx
//!
//! # Also export every entity, fanning sheets out over all cores
//! cargo run -- preview data/groups.xlsx --entities-out entities.ndjson --parallel
//!
//! # Show which registered sheets the workbook has
//! cargo run -- sheets data/groups.xlsx
//!
//! # Check how a single group would be classified
//! cargo run -- classify --sheet "Right Hindu Groups" --name "Hindu Jagruti Sena" --members 3543
//! ```
//!
//! ## Configuration
//!
//! - `GROUPNORM_WORKBOOK`: workbook path used when none is given on the command line
//! - `GROUPNORM_RULES_PATH`: JSON rules file (sentinels, label artifacts, rule tables)
//! - `GROUPNORM_EXTRA_SENTINELS`: extra `;`-separated "no data" tokens
//! - `GROUPNORM_SAMPLE_SIZE`: number of sample entities in the report (default 10)
//! - `RUST_LOG`: stdout log filter

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use groupnorm::config::{NormalizerConfig, ENV_WORKBOOK};
use groupnorm::formats::{registry, resolve_format_group};
use groupnorm::pipeline::{write_entities_ndjson, Pipeline, Summary};
use groupnorm::workbook::Workbook;
use prettytable::{Cell, Row as PrettyRow, Table};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON rules file overriding the built-in lexicons and rule tables
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a workbook and write a preview report
    Preview {
        /// Workbook path (xlsx, xls, xlsb, ods or json)
        workbook: Option<PathBuf>,

        /// Where to write the preview report
        #[arg(short, long, default_value = "preview_report.json")]
        output: PathBuf,

        /// Also write every entity as NDJSON
        #[arg(short, long)]
        entities_out: Option<PathBuf>,

        /// Number of sample entities in the report
        #[arg(short, long)]
        sample_size: Option<usize>,

        /// Process sheets in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// List registered sheets and whether the workbook has them
    Sheets {
        /// Workbook path (xlsx, xls, xlsb, ods or json)
        workbook: Option<PathBuf>,
    },

    /// Classify a single group
    Classify {
        /// Source sheet name
        #[arg(short, long)]
        sheet: String,

        /// Group name
        #[arg(short, long)]
        name: String,

        /// Member count
        #[arg(short, long, default_value = "0")]
        members: u64,
    },
}

fn main() -> Result<()> {
    groupnorm::logging::configure_logging();

    let cli = Cli::parse();
    let mut config = NormalizerConfig::load(cli.rules.as_deref())?;

    match cli.command {
        Commands::Preview {
            workbook,
            output,
            entities_out,
            sample_size,
            parallel,
        } => {
            if let Some(size) = sample_size {
                config.sample_size = size;
            }
            let path = workbook_path(workbook)?;
            info!("Previewing {}", path.display());

            let pipeline = Pipeline::new(&config).with_parallel(parallel);
            let normalized = match pipeline.normalize_path(&path) {
                Ok(normalized) => normalized,
                Err(err) => {
                    error!("Run aborted: {:#}", err);
                    return Err(err);
                }
            };

            let report = pipeline
                .report(&normalized)
                .with_source(&path.display().to_string());
            report.write_json(&output)?;

            if let Some(entities_path) = entities_out {
                write_entities_ndjson(&normalized.entities, &entities_path)?;
            }

            print_summary(&report.summary);
            println!("Preview report written to {}", output.display());
        }

        Commands::Sheets { workbook } => {
            let path = workbook_path(workbook)?;
            let workbook = Workbook::open(&path)?;
            print_sheets(&workbook);
        }

        Commands::Classify {
            sheet,
            name,
            members,
        } => {
            let classifier = config.classifier();
            println!(
                "'{}' in '{}' ({} members): type={}, risk={}",
                name,
                sheet,
                members,
                classifier.determine_type(&sheet, &name),
                classifier.determine_risk_level(&sheet, &name, members)
            );
        }
    }

    Ok(())
}

fn workbook_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    arg.or_else(|| std::env::var(ENV_WORKBOOK).ok().map(PathBuf::from))
        .ok_or_else(|| anyhow!("No workbook given and {} is not set", ENV_WORKBOOK))
        .and_then(|p| {
            if Path::new(&p).exists() {
                Ok(p)
            } else {
                Err(anyhow!("Workbook not found: {}", p.display()))
            }
        })
        .context("Cannot locate workbook")
}

fn print_summary(summary: &Summary) {
    let mut table = Table::new();
    table.add_row(PrettyRow::new(vec![
        Cell::new("Sheet"),
        Cell::new("Groups"),
        Cell::new("Skipped"),
    ]));
    for (sheet, count) in &summary.by_sheet {
        let skipped = summary.skipped_by_sheet.get(sheet).copied().unwrap_or(0);
        table.add_row(PrettyRow::new(vec![
            Cell::new(sheet),
            Cell::new(&count.to_string()),
            Cell::new(&skipped.to_string()),
        ]));
    }
    table.printstd();

    let mut breakdown = Table::new();
    breakdown.add_row(PrettyRow::new(vec![Cell::new("Bucket"), Cell::new("Groups")]));
    for (group_type, count) in &summary.by_type {
        breakdown.add_row(PrettyRow::new(vec![
            Cell::new(&format!("type: {}", group_type)),
            Cell::new(&count.to_string()),
        ]));
    }
    for (risk, count) in &summary.by_risk_level {
        breakdown.add_row(PrettyRow::new(vec![
            Cell::new(&format!("risk: {}", risk)),
            Cell::new(&count.to_string()),
        ]));
    }
    breakdown.printstd();

    println!(
        "{} groups from {} sheets, {} rows skipped",
        summary.total_groups,
        summary.total_sheets,
        summary.total_skipped()
    );
    if !summary.errors.is_empty() {
        println!("{} non-fatal errors:", summary.errors.len());
        for err in &summary.errors {
            println!("  - {}", err);
        }
    }
    if !summary.unregistered_sheets.is_empty() {
        println!(
            "Ignored unregistered sheets: {}",
            summary.unregistered_sheets.join(", ")
        );
    }
}

fn print_sheets(workbook: &Workbook) {
    let mut table = Table::new();
    table.add_row(PrettyRow::new(vec![
        Cell::new("Format group"),
        Cell::new("Sheet"),
        Cell::new("Rows"),
    ]));

    for (group, sheets) in registry() {
        for sheet_name in *sheets {
            let rows = workbook
                .sheet(sheet_name)
                .map(|s| s.rows.len().to_string())
                .unwrap_or_else(|| "missing".to_string());
            table.add_row(PrettyRow::new(vec![
                Cell::new(group.name()),
                Cell::new(sheet_name),
                Cell::new(&rows),
            ]));
        }
    }

    for sheet in workbook.sheets() {
        if resolve_format_group(&sheet.name).is_none() {
            table.add_row(PrettyRow::new(vec![
                Cell::new("(unregistered)"),
                Cell::new(&sheet.name),
                Cell::new(&sheet.rows.len().to_string()),
            ]));
        }
    }

    table.printstd();
}
