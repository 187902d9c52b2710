use crate::commands::print_json;
use crate::error::not_found;
use anyhow::{Context as _, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ListFilesArgs {
    /// Directory to search (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub fn list_files(json: bool, args: ListFilesArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    let files = csv_files_in(&dir)?;

    if json {
        return print_json(&files);
    }

    if files.is_empty() {
        println!("No CSV files found in {}", dir.display());
        return Ok(());
    }
    println!("Available CSV files in {}:", dir.display());
    for name in files {
        println!("- {name}");
    }
    Ok(())
}

fn csv_files_in(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(not_found(format!("directory {}", dir.display())));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::csv_files_in;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn csv_files_in_lists_sorted_csv_names() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("b.csv"), "").expect("write");
        fs::write(temp.path().join("A.CSV"), "").expect("write");
        fs::write(temp.path().join("notes.txt"), "").expect("write");
        fs::create_dir(temp.path().join("dir.csv")).expect("mkdir");

        let names = csv_files_in(temp.path()).expect("list");
        assert_eq!(names, vec!["A.CSV", "b.csv"]);
    }

    #[test]
    fn csv_files_in_requires_directory() {
        let temp = TempDir::new().expect("temp dir");
        assert!(csv_files_in(&temp.path().join("missing")).is_err());
    }
}
