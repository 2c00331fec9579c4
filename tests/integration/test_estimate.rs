//! Library-level end-to-end tests for `coverage::estimate`.

use std::num::NonZeroUsize;

use covmed_lib::coverage::{EstimateOptions, estimate};
use covmed_lib::errors::{CovmedError, SampleKind};
use noodles::sam::alignment::record::Flags;
use tempfile::TempDir;

use crate::helpers::bam_generator::{create_proper_pairs, mapped_record, write_indexed_bam};

#[test]
fn test_estimate_counts_and_sizes() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(20));

    let report = estimate(&EstimateOptions::new(&bam)).unwrap();

    assert_eq!(report.totals.mapped_reads, 40);
    assert_eq!(report.totals.total_bases, 15_000);
    assert_eq!(report.totals.missing, vec!["chr2".to_string()]);
    assert_eq!(report.samples.records_examined, 40);
    assert_eq!(report.samples.read_lengths, 40);
    assert_eq!(report.samples.insert_sizes, 20);
    assert!((report.sizes.read_length_mean - 100.0).abs() < f64::EPSILON);
    assert!((report.sizes.read_length_median - 99.0).abs() < f64::EPSILON);
    assert_eq!(report.to_string(), "0.26\t200.00\t0.00\t400.00\t0.00");
}

#[test]
fn test_estimate_stops_when_insert_buffer_fills() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(20));

    let options =
        EstimateOptions { sample_size: NonZeroUsize::new(5).unwrap(), ..EstimateOptions::new(&bam) };
    let report = estimate(&options).unwrap();

    assert_eq!(report.samples.insert_sizes, 5);
    assert_eq!(report.samples.read_lengths, 5);
    assert_eq!(report.samples.records_examined, 5);
    // Mapped reads still come from the index, not the sampled records
    assert_eq!(report.totals.mapped_reads, 40);
}

#[test]
fn test_estimate_with_multithreaded_decompression() {
    let dir = TempDir::new().unwrap();
    let bam = write_indexed_bam(dir.path(), "sample.bam", &create_proper_pairs(20));

    let single = estimate(&EstimateOptions::new(&bam)).unwrap();
    let multi = estimate(&EstimateOptions { threads: 3, ..EstimateOptions::new(&bam) }).unwrap();
    assert_eq!(single, multi);
}

#[test]
fn test_estimate_without_pairs_is_insufficient() {
    let dir = TempDir::new().unwrap();
    let records: Vec<_> =
        (0..10).map(|i| mapped_record(&format!("read_{i}"), Flags::empty(), 100 + i)).collect();
    let bam = write_indexed_bam(dir.path(), "single.bam", &records);

    let err = estimate(&EstimateOptions::new(&bam)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CovmedError>(),
        Some(CovmedError::InsufficientSamples { sample: SampleKind::InsertSize })
    ));
}
