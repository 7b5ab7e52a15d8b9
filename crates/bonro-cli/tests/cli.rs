use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "\
S.C. MAGAZIN S.R.L.
BON FISCAL NR 0042
2 BUC x 3,49 A
LAPTE ZUZU 1.5L
Paine alba 4.50
TOTAL 11,48 LEI
";

fn bonro() -> Command {
    Command::cargo_bin("bonro").unwrap()
}

/// A config file pointing at an engine binary that does not exist.
fn config_without_engine(dir: &TempDir) -> String {
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"recognition": {"binary": "/nonexistent/bin/tesseract"}}"#,
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_parse_text_file_to_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    bonro()
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(",product,quantity,unit_price,vat_code\n"))
        .stdout(predicate::str::contains("0,LAPTE ZUZU,2,3.49,\n"))
        .stdout(predicate::str::contains("1,Paine alba,1,4.50,\n"));
}

#[test]
fn test_parse_stdin_to_json() {
    bonro()
        .args(["parse", "-", "--format", "json"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""unit_price": "4.50""#))
        .stdout(predicate::str::contains(r#""receipt_number": "0042""#));
}

#[test]
fn test_parse_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("df_receipt.csv");
    fs::write(&input, "Paine alba 4.50\n").unwrap();

    bonro()
        .arg("parse")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        ",product,quantity,unit_price,vat_code\n0,Paine alba,1,4.50,\n"
    );
}

#[test]
fn test_parse_without_index_column() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"export": {"include_index": false}}"#).unwrap();

    bonro()
        .arg("-c")
        .arg(&config)
        .args(["parse", "-"])
        .write_stdin("Paine alba 4.50\n")
        .assert()
        .success()
        .stdout("product,quantity,unit_price,vat_code\nPaine alba,1,4.50,\n");
}

#[test]
fn test_parse_missing_file() {
    bonro()
        .args(["parse", "/nonexistent/receipt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_missing_image() {
    bonro()
        .args(["process", "/nonexistent/receipt.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_undecodable_image() {
    let dir = TempDir::new().unwrap();
    let config = config_without_engine(&dir);
    let image = dir.path().join("receipt.png");
    fs::write(&image, b"not an image").unwrap();

    bonro()
        .args(["-c", config.as_str(), "process"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode image"));
}

#[test]
fn test_batch_no_matches() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.jpg");

    bonro()
        .arg("batch")
        .arg(&pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn test_batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    let config = config_without_engine(&dir);
    fs::write(dir.path().join("bon.png"), b"not an image").unwrap();
    let pattern = dir.path().join("*.png");

    bonro()
        .args(["-c", config.as_str(), "batch"])
        .arg(&pattern)
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed for"));
}

#[test]
fn test_batch_continue_on_error_writes_summary() {
    let dir = TempDir::new().unwrap();
    let config = config_without_engine(&dir);
    fs::write(dir.path().join("bon.png"), b"not an image").unwrap();
    let pattern = dir.path().join("*.png");
    let out = dir.path().join("out");

    bonro()
        .args(["-c", config.as_str(), "batch"])
        .arg(&pattern)
        .arg("-o")
        .arg(&out)
        .args(["--continue-on-error", "--summary", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful, 1 failed"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,items,total,error,processing_time_ms\n"));
    assert!(summary.contains("bon.png,error,,,"));
    assert!(!out.join("df_bon.csv").exists());
}

#[test]
fn test_config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bonro").join("config.json");
    let config = config.to_string_lossy().into_owned();

    bonro()
        .args(["-c", config.as_str(), "config", "init"])
        .assert()
        .success();

    bonro()
        .args(["-c", config.as_str(), "config", "get", "recognition.language"])
        .assert()
        .success()
        .stdout("\"ron\"\n");

    bonro()
        .args(["-c", config.as_str(), "config", "set", "preprocessing.min_width", "2400"])
        .assert()
        .success();

    bonro()
        .args(["-c", config.as_str(), "config", "get", "preprocessing.min_width"])
        .assert()
        .success()
        .stdout("2400\n");

    bonro()
        .args(["-c", config.as_str(), "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_get_unknown_key() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    bonro()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "recognition.engine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    bonro()
        .arg("-c")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn test_rust_log_overrides_verbosity() {
    bonro()
        .args(["parse", "-"])
        .env("RUST_LOG", "debug")
        .write_stdin("Paine alba 4.50\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Parsed 1 items from 1 lines"));

    bonro()
        .args(["parse", "-"])
        .env_remove("RUST_LOG")
        .write_stdin("Paine alba 4.50\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Parsed 1 items").not());
}
