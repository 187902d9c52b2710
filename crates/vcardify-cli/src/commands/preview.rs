use crate::commands::{print_json, Context};
use crate::util::build_table;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use vcardify_sync::reader::{preview_source, CsvPreview};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    pub input: PathBuf,
    /// Number of rows to show
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn preview(ctx: &Context<'_>, args: PreviewArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.preview_limit);
    let preview = preview_source(&args.input, limit)?;
    if ctx.json {
        return print_json(&preview);
    }
    print_preview(&preview);
    Ok(())
}

pub fn print_preview(preview: &CsvPreview) {
    println!("CSV preview:");
    println!("Total rows: {}", preview.total_rows);
    println!("Columns: {}", preview.headers.join(", "));
    println!();
    println!("First {} rows", preview.rows.len());
    println!("{}", build_table(&preview.headers, &preview.rows));
}
