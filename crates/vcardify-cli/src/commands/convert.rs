use crate::commands::preview::print_preview;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{build_table, now_local};
use anyhow::Result;
use clap::Args;
use comfy_table::Table;
use std::path::{Path, PathBuf};
use tracing::debug;
use vcardify_config::{validate_country_code, AppConfig};
use vcardify_core::{ContactStats, CoreError, RejectedRow, VcardDialect};
use vcardify_sync::reader::preview_source;
use vcardify_sync::{ConversionSummary, ConvertOptions, Converter, Reporter};

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// CSV file to convert
    pub input: PathBuf,
    /// Output vCard file (defaults to a timestamped file in the output directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Country code prepended to ten-digit numbers, e.g. +91
    #[arg(long, allow_hyphen_values = true)]
    pub country_code: Option<String>,
    /// vCard version to write: 2.1 or 3.0
    #[arg(
        long = "version",
        alias = "vcard-version",
        value_name = "VERSION",
        value_parser = parse_dialect
    )]
    pub vcard_version: Option<VcardDialect>,
    /// Text appended to every contact name
    #[arg(long, allow_hyphen_values = true)]
    pub suffix: Option<String>,
    /// Directory for generated files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Do not back up an existing output file
    #[arg(long)]
    pub no_backup: bool,
    /// Number of rows to preview before converting
    #[arg(long)]
    pub preview_limit: Option<usize>,
    /// Only print errors
    #[arg(long, short)]
    pub quiet: bool,
}

struct ConsoleReporter {
    quiet: bool,
}

impl Reporter for ConsoleReporter {
    fn headers(&mut self, headers: &[String]) {
        if !self.quiet {
            println!("CSV headers found: {}", headers.join(", "));
        }
    }

    fn rejected(&mut self, row: &RejectedRow) {
        if !self.quiet {
            println!("Invalid contact at row {}: {}", row.row_number, row.reason);
        }
    }

    fn backup_created(&mut self, path: &Path) {
        if !self.quiet {
            println!("Backup created: {}", path.display());
        }
    }
}

pub fn convert(ctx: &Context<'_>, args: ConvertArgs) -> Result<()> {
    let options = convert_options(ctx.config, &args)?;
    let quiet = args.quiet || ctx.json;
    let preview_limit = args.preview_limit.unwrap_or(ctx.config.preview_limit);

    if !quiet && preview_limit > 0 {
        match preview_source(&args.input, preview_limit) {
            Ok(preview) => print_preview(&preview),
            Err(err) => debug!(error = %err, "skipping preview"),
        }
    }

    let converter = Converter::new(options);
    let mut reporter = ConsoleReporter { quiet };
    let summary = converter.convert(
        &args.input,
        args.output.as_deref(),
        now_local(),
        &mut reporter,
    )?;

    if ctx.json {
        return print_json(&summary);
    }
    if !args.quiet {
        print_summary(&summary);
    }
    Ok(())
}

fn convert_options(config: &AppConfig, args: &ConvertArgs) -> Result<ConvertOptions> {
    let country_code = match &args.country_code {
        Some(raw) => validate_country_code(raw).map_err(|err| invalid_input(err.to_string()))?,
        None => config.country_code.clone(),
    };
    if let Some(dir) = &args.output_dir {
        if dir.as_os_str().is_empty() {
            return Err(invalid_input("--output-dir cannot be empty"));
        }
    }

    Ok(ConvertOptions {
        country_code,
        dialect: args.vcard_version.unwrap_or(config.dialect),
        name_suffix: args
            .suffix
            .clone()
            .unwrap_or_else(|| config.name_suffix.clone()),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.clone()),
        backup: config.backup && !args.no_backup,
    })
}

fn parse_dialect(raw: &str) -> std::result::Result<VcardDialect, CoreError> {
    raw.parse()
}

fn print_summary(summary: &ConversionSummary) {
    println!();
    println!("Processing summary:");
    println!("  Total contacts processed: {}", summary.processed);
    println!("  Valid contacts: {}", summary.valid);
    println!("  Invalid contacts: {}", summary.invalid);

    println!();
    println!("Contact statistics:");
    println!("{}", stats_table(&summary.stats));

    println!();
    println!("Success!");
    println!("  vCard file created: {}", summary.output.display());
    println!("  Total contacts: {}", summary.valid);
    println!("  vCard version: {}", summary.dialect);
    let suffix = if summary.name_suffix.is_empty() {
        "None"
    } else {
        summary.name_suffix.as_str()
    };
    println!("  Name suffix added: {suffix}");
    if let Some(report) = &summary.report {
        println!("  Error report: {}", report.display());
    }
}

fn stats_table(stats: &ContactStats) -> Table {
    let mut rows = vec![vec![
        "Total contacts".to_string(),
        stats.total.to_string(),
        "100.0%".to_string(),
    ]];
    for (label, count) in stats.rows() {
        rows.push(vec![
            label.to_string(),
            count.to_string(),
            format!("{:.1}%", stats.percentage(count)),
        ]);
    }
    build_table(&["Metric", "Count", "Percentage"], &rows)
}
