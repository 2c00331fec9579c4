//! Coverage estimation from index counts and a sampled read-length median.
//!
//! [`estimate`] ties the pieces together: index lookup, header references, optional region
//! lengths and the single sampling pass over the BAM. The result is a [`CoverageReport`] whose
//! [`Display`](std::fmt::Display) is the one-line tab-separated output of the tool.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Result;
use log::info;

use crate::bam_io::{
    alignment_records, check_coordinate_sort, create_bam_reader, locate_bam_index, read_bai_index,
};
use crate::errors::CovmedError;
use crate::logging::OperationTimer;
use crate::reference::{ReferenceTotals, header_references, tally_references};
use crate::regions::read_region_length;
use crate::sampler::{SampleSet, sample_reads};
use crate::stats::Sizes;

/// Default number of values collected per sample buffer.
pub const DEFAULT_SAMPLE_SIZE: usize = 100_000;

/// Inputs for one coverage estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateOptions {
    /// Coordinate-sorted, indexed BAM
    pub input: PathBuf,
    /// Optional BED-like file whose total length replaces the genome length
    pub regions: Option<PathBuf>,
    /// Capacity of each sample buffer
    pub sample_size: NonZeroUsize,
    /// BGZF decompression threads
    pub threads: usize,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            regions: None,
            sample_size: NonZeroUsize::new(DEFAULT_SAMPLE_SIZE).unwrap_or(NonZeroUsize::MIN),
            threads: 1,
        }
    }
}

impl EstimateOptions {
    /// Options for `input` with default sample size and a single thread.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), ..Self::default() }
    }
}

/// Buffer sizes and record counts from the sampling pass, kept after the buffers are summarized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleCounts {
    pub read_lengths: usize,
    pub insert_sizes: usize,
    pub records_examined: u64,
    pub records_filtered: u64,
}

impl From<&SampleSet> for SampleCounts {
    fn from(samples: &SampleSet) -> Self {
        Self {
            read_lengths: samples.read_lengths.len(),
            insert_sizes: samples.insert_sizes.len(),
            records_examined: samples.records_examined,
            records_filtered: samples.records_filtered,
        }
    }
}

/// The estimate for one BAM.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub coverage: f64,
    pub sizes: Sizes,
    pub totals: ReferenceTotals,
    pub samples: SampleCounts,
}

/// `coverage\tinsert_mean\tinsert_sd\ttemplate_mean\ttemplate_sd`, two decimals each.
impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}\t{}", self.coverage, self.sizes)
    }
}

/// Mean depth: `mapped_reads * read_length_median / total_bases`.
///
/// # Errors
///
/// Returns [`CovmedError::ZeroTotalBases`] when `total_bases` is zero.
///
/// # Examples
///
/// ```
/// use covmed_lib::coverage::estimate_coverage;
///
/// assert_eq!(estimate_coverage(1000, 100.0, 10_000).unwrap(), 10.0);
/// assert!(estimate_coverage(1000, 100.0, 0).is_err());
/// ```
pub fn estimate_coverage(
    mapped_reads: u64,
    read_length_median: f64,
    total_bases: u64,
) -> crate::errors::Result<f64> {
    if total_bases == 0 {
        return Err(CovmedError::ZeroTotalBases);
    }
    Ok(mapped_reads as f64 * read_length_median / total_bases as f64)
}

/// Runs the full estimate for `options`.
///
/// # Errors
///
/// Returns an error if the BAM or its index cannot be found or read, the region file is
/// malformed, any sample buffer ends up empty, or the total length is zero.
pub fn estimate(options: &EstimateOptions) -> Result<CoverageReport> {
    let input = options.input.as_path();
    info!("Estimating coverage for {}", input.display());

    let index_path = locate_bam_index(input)?;
    info!("Using index {}", index_path.display());
    let index = read_bai_index(&index_path)?;

    let (mut reader, header) = create_bam_reader(input, options.threads)?;
    check_coordinate_sort(&header, input);

    let references = header_references(&header);
    let mut totals = tally_references(&references, &index, &input.display().to_string());
    if let Some(regions) = &options.regions {
        let region_length = read_region_length(regions)?;
        info!("Target regions in {} cover {region_length} bases", regions.display());
        totals = totals.with_region_length(region_length);
    }

    let timer = OperationTimer::new("Sampling reads");
    let records = alignment_records(&mut reader, &header, input);
    let samples = sample_reads(records, options.sample_size)?;
    timer.log_completion(samples.records_examined);

    let counts = SampleCounts::from(&samples);
    let sizes = samples.into_sizes()?;
    let coverage =
        estimate_coverage(totals.mapped_reads, sizes.read_length_median, totals.total_bases)?;

    Ok(CoverageReport { coverage, sizes, totals, samples: counts })
}
