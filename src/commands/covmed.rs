//! Estimate coverage and insert-size statistics for an indexed BAM.
//!
//! Prints one tab-separated line to stdout; everything else goes to the log on stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use covmed_lib::coverage::{DEFAULT_SAMPLE_SIZE, EstimateOptions, estimate};
use covmed_lib::logging::log_estimate_summary;
use covmed_lib::validation::{validate_file_exists, validate_positive};
use log::info;

use crate::commands::command::Command;

/// Estimate coverage, insert size and template length from a BAM and its index.
#[derive(Debug, Parser)]
#[command(
    name = "covmed",
    styles = crate::STYLES,
    version = crate::version::VERSION.as_str(),
    about = "\x1b[36mEstimate coverage and insert sizes from an indexed BAM\x1b[0m",
    long_about = r#"
Estimate mean coverage and insert-size statistics from a coordinate-sorted, indexed BAM.

Mapped read counts come from the BAM index (<BAM>.bai, or the BAM path with its final four
characters replaced by .bai). Read lengths, insert sizes and template lengths are sampled from
the start of the file, skipping secondary, supplementary, unmapped and QC-fail records. Only
the leftmost read of each proper pair aligned as a single M block contributes an insert size.

coverage = mapped reads * median read length / total bases

where total bases is the genome length from the header, or the total length of the intervals
in REGIONS when given.

Output is one line on stdout:
  coverage  insert_mean  insert_sd  template_mean  template_sd

Example usage:
  covmed sample.bam
  covmed -n 50000 sample.bam targets.bed
  covmed --threads 4 sample.bam targets.bed.gz
"#
)]
pub struct Covmed {
    /// Coordinate-sorted BAM with a .bai index
    #[arg(value_name = "BAM")]
    pub input: PathBuf,

    /// Optional BED-like file (chrom, start, end, ...) of target regions; may be gzipped
    #[arg(value_name = "REGIONS")]
    pub regions: Option<PathBuf>,

    /// Number of values to sample for each statistic
    #[arg(short = 'n', long = "sample-size", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Number of threads for BAM decompression
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
}

impl Covmed {
    /// Validates the arguments and builds the estimate inputs.
    fn options(&self) -> Result<EstimateOptions> {
        validate_file_exists(&self.input, "Input BAM")?;
        if let Some(regions) = &self.regions {
            validate_file_exists(regions, "Region file")?;
        }
        let sample_size = validate_positive(self.sample_size, "sample-size")?;
        validate_positive(self.threads, "threads")?;

        Ok(EstimateOptions {
            input: self.input.clone(),
            regions: self.regions.clone(),
            sample_size,
            threads: self.threads,
        })
    }
}

impl Command for Covmed {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let options = self.options()?;

        info!("Input: {}", options.input.display());
        if let Some(regions) = &options.regions {
            info!("Regions: {}", regions.display());
        }
        info!("Sample size: {}", options.sample_size);
        if options.threads > 1 {
            info!("Threads: {}", options.threads);
        }

        let report = estimate(&options)?;
        log_estimate_summary(&report);

        writeln!(out, "{report}").context("Failed to write output")?;
        out.flush().context("Failed to write output")?;
        Ok(())
    }
}
