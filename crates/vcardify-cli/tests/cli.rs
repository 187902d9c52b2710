use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("vcardify")
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("RUST_LOG")
        .current_dir(home)
        .args(args)
        .output()
        .expect("run command")
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run(home, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn write_csv(home: &Path, contents: &str) {
    fs::write(home.join("contacts.csv"), contents).expect("write csv");
}

#[test]
fn cli_convert_writes_cards_and_report() {
    let temp = TempDir::new().expect("temp dir");
    write_csv(
        temp.path(),
        "Name,Phone ,Email\nJohn Smith,9876543210,john@example.com\n,123,\n",
    );

    let summary = run_json(temp.path(), &["convert", "contacts.csv", "--output-dir", "out"]);
    assert_eq!(summary["valid"], 1);
    assert_eq!(summary["invalid"], 1);
    assert_eq!(summary["dialect"], "3.0");
    assert_eq!(summary["stats"]["with_email"], 1);

    let output = summary["output"].as_str().expect("output path");
    let data = fs::read_to_string(temp.path().join(output)).expect("read vcf");
    assert_eq!(data.matches("BEGIN:VCARD").count(), 1);
    assert!(data.contains("TEL;TYPE=CELL:+91 9876 5432 10"));
    assert!(data.contains("EMAIL;TYPE=INTERNET:john@example.com"));

    let report = summary["report"].as_str().expect("report path");
    let rows: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join(report)).expect("read report"))
            .expect("report json");
    assert_eq!(rows[0]["row_number"], 3);
}

#[test]
fn cli_convert_applies_flags() {
    let temp = TempDir::new().expect("temp dir");
    write_csv(temp.path(), "name,phone\nJane Doe,4155551212\n");

    let output = run(
        temp.path(),
        &[
            "convert",
            "contacts.csv",
            "-o",
            "cards/jane.vcf",
            "--version",
            "2.1",
            "--suffix",
            " (Work)",
            "--country-code",
            "+1",
            "--quiet",
        ],
    );
    assert!(output.status.success(), "command failed: {:?}", output);
    assert!(output.stdout.is_empty());

    let data = fs::read_to_string(temp.path().join("cards").join("jane.vcf")).expect("read vcf");
    assert_eq!(
        data,
        "BEGIN:VCARD\nVERSION:2.1\nN:;Jane Doe (Work);;;\nFN:Jane Doe (Work)\nTEL;CELL;PREF:+1 4 1555 5121 2\nEND:VCARD"
    );
}

#[test]
fn cli_version_flag_is_scoped_per_command() {
    let temp = TempDir::new().expect("temp dir");
    let output = run(temp.path(), &["--version"]);
    assert!(output.status.success(), "command failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.starts_with("vcardify "));

    write_csv(temp.path(), "name,phone\nAda,9876543210\n");
    let summary = run_json(
        temp.path(),
        &["convert", "contacts.csv", "--vcard-version", "2.1"],
    );
    assert_eq!(summary["dialect"], "2.1");
}

#[test]
fn cli_convert_reads_config_file() {
    let temp = TempDir::new().expect("temp dir");
    let config_dir = temp.path().join("config").join("vcardify");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(
        config_dir.join("config.toml"),
        "vcard_version = \"2.1\"\noutput_dir = \"exports\"\n",
    )
    .expect("write config");
    write_csv(temp.path(), "name,phone\nAda,9876543210\n");

    let summary = run_json(temp.path(), &["convert", "contacts.csv"]);
    assert_eq!(summary["dialect"], "2.1");
    let output = summary["output"].as_str().expect("output path");
    assert!(output.starts_with("exports"));
}

#[test]
fn cli_convert_missing_input_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let output = run(temp.path(), &["convert", "missing.csv"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("input file not found"));
    assert!(stderr.contains("missing.csv"));
    assert!(!temp.path().join("output").exists());
}

#[test]
fn cli_convert_without_valid_rows_exits_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    write_csv(temp.path(), "name,phone\nBob,12\n");
    let output = run(temp.path(), &["convert", "contacts.csv"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("no valid contacts"));
    assert!(!temp.path().join("output").exists());
}

#[test]
fn cli_preview_and_list_files() {
    let temp = TempDir::new().expect("temp dir");
    write_csv(temp.path(), "name,phone\nAda,1\nGrace,2\nLinus,3\n");
    fs::write(temp.path().join("other.csv"), "name,phone\n").expect("write csv");

    let preview = run_json(temp.path(), &["preview", "contacts.csv", "--limit", "2"]);
    assert_eq!(preview["total_rows"], 3);
    assert_eq!(preview["rows"].as_array().expect("rows").len(), 2);
    assert_eq!(preview["headers"][1], "phone");

    let files = run_json(temp.path(), &["list-files"]);
    assert_eq!(files, serde_json::json!(["contacts.csv", "other.csv"]));
}
