mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::commands::{convert, files, preview, Context};
use crate::error::{exit_code_for, report_error};
use vcardify_config as config;

#[derive(Debug, Parser)]
#[command(name = "vcardify", version, about = "Convert CSV contact lists to vCard files")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Also append logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a CSV file into a vCard file
    Convert(convert::ConvertArgs),
    /// Show the first rows of a CSV file
    Preview(preview::PreviewArgs),
    /// List CSV files in a directory
    #[command(name = "list-files")]
    ListFiles(files::ListFilesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let _guard = match init_logging(verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            report_error(&err, verbose);
            return exit_code_for(&err);
        }
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        log_file: _,
        command,
    } = cli;

    match command {
        Command::ListFiles(args) => files::list_files(json, args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let ctx = Context {
                json,
                config: &app_config,
            };

            match command {
                Command::Convert(args) => convert::convert(&ctx, args),
                Command::Preview(args) => preview::preview(&ctx, args),
                Command::ListFiles(_) => {
                    unreachable!("list-files command handled before config loading")
                }
            }
        }
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let console_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(LevelFilter::INFO);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
    if let (Err(err), Some(path)) = (installed, log_file) {
        warn!(
            error = %err,
            path = %path.display(),
            "logging already initialized; log file not attached"
        );
    }
    Ok(guard)
}
