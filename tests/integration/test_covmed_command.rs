//! Integration tests for the covmed command line.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use crate::helpers::bam_generator::{
    create_proper_pairs, write_bam, write_index, write_indexed_bam,
};

fn run_covmed(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_covmed"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to run covmed")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_prints_one_line() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(20));

    let output = run_covmed(&[path_str(&bam)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "0.26\t200.00\t0.00\t400.00\t0.00\n");
}

#[test]
fn test_logs_input_and_missing_reference() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(20));

    let output = run_covmed(&[path_str(&bam)]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(path_str(&bam)));
    assert!(stderr.contains("chromosome: chr2 not found in"));
    assert!(!stderr.contains("chromosome: chr1 not found"));
}

#[test]
fn test_region_file_replaces_genome_length() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(20));
    let regions = dir.path().join("targets.bed");
    let mut file = fs::File::create(&regions).unwrap();
    writeln!(file, "chr1\t0\t600\t.\t.").unwrap();
    writeln!(file, "chr1\t1000\t1400\t.\t.").unwrap();
    drop(file);

    let output = run_covmed(&["-n", "5", path_str(&bam), path_str(&regions)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    // 40 mapped reads * median 99 / 1000 bases
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "3.96\t200.00\t0.00\t400.00\t0.00\n");
}

#[test]
fn test_index_without_bam_extension() {
    let dir = TempDir::new().unwrap();
    let bam = write_bam(dir.path(), "sample.bam", &create_proper_pairs(20));
    write_index(&bam, &dir.path().join("sample.bai"));

    let output = run_covmed(&["--threads", "2", path_str(&bam)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "0.26\t200.00\t0.00\t400.00\t0.00\n");
}

#[test]
fn test_missing_index_fails() {
    let dir = TempDir::new().unwrap();
    let bam = write_bam(dir.path(), "sample.bam", &create_proper_pairs(5));

    let output = run_covmed(&[path_str(&bam)]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No BAM index found"));
    assert!(stderr.contains("sample.bam.bai"));
    assert!(stderr.contains("sample.bai"));
}

#[test]
fn test_malformed_region_file_fails() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(5));
    let regions = dir.path().join("targets.bed");
    fs::write(&regions, "chr1\t0\t100\nchr1\tnot-a-number\t200\n").unwrap();

    let output = run_covmed(&[path_str(&bam), path_str(&regions)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
}

#[test]
fn test_zero_sample_size_fails() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(5));

    let output = run_covmed(&["-n", "0", path_str(&bam)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sample-size"));
}

#[test]
fn test_version() {
    let output = run_covmed(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("covmed "));
}
