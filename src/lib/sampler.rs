//! Single-pass sampling of read lengths, insert sizes and template lengths.
//!
//! The sampler walks a record stream once, feeding two independently capped buffers:
//!
//! - **read lengths**: every record that passes the flag filter, until `sample_size` are held
//! - **insert/template sizes**: leftmost reads of proper pairs aligned as one `M` block
//!
//! The pass ends when the insert-size buffer is full or the stream is exhausted. Because the
//! stream cannot be rewound, the read-length buffer holds whatever it collected by then, which may
//! be fewer than `sample_size` entries.

use std::num::NonZeroUsize;

use anyhow::Result;

use crate::errors::{CovmedError, SampleKind};
use crate::progress::ProgressTracker;
use crate::record::AlignmentRecord;
use crate::stats::{Sizes, mean, mean_std, read_length_median};

/// Upper bound on the capacity reserved for each buffer before the pass; larger sample sizes grow
/// the buffers as records arrive.
const MAX_PREALLOCATED: usize = 100_000;

/// Capped sample buffers produced by one sampling pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    /// Query-consumed lengths of records passing the flag filter
    pub read_lengths: Vec<i64>,
    /// Mate start minus alignment end for qualifying pairs
    pub insert_sizes: Vec<i64>,
    /// Aligner-reported template lengths for qualifying pairs
    pub template_lengths: Vec<i64>,
    /// Records pulled from the source
    pub records_examined: u64,
    /// Records dropped by the flag filter
    pub records_filtered: u64,
}

impl SampleSet {
    /// Summarizes the buffers into [`Sizes`], consuming the set.
    ///
    /// # Errors
    ///
    /// Returns [`CovmedError::InsufficientSamples`] naming the first empty buffer.
    pub fn into_sizes(mut self) -> crate::errors::Result<Sizes> {
        let insufficient = |sample| CovmedError::InsufficientSamples { sample };

        let read_length_mean =
            mean(&self.read_lengths).ok_or_else(|| insufficient(SampleKind::ReadLength))?;
        let read_length_median = read_length_median(&mut self.read_lengths)
            .ok_or_else(|| insufficient(SampleKind::ReadLength))?;
        let (insert_mean, insert_sd) =
            mean_std(&self.insert_sizes).ok_or_else(|| insufficient(SampleKind::InsertSize))?;
        let (template_mean, template_sd) = mean_std(&self.template_lengths)
            .ok_or_else(|| insufficient(SampleKind::TemplateLength))?;

        Ok(Sizes {
            insert_mean,
            insert_sd,
            template_mean,
            template_sd,
            read_length_mean,
            read_length_median,
        })
    }
}

/// Samples up to `sample_size` values per buffer from `records` in a single pass.
///
/// Records flagged secondary, supplementary, unmapped or QC-fail are skipped before either buffer
/// is considered. The first error yielded by `records` aborts the pass.
///
/// # Errors
///
/// Returns the first error produced by the record source.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use covmed_lib::sampler::sample_reads;
///
/// let records = std::iter::empty();
/// let samples = sample_reads(records, NonZeroUsize::new(10).unwrap()).unwrap();
/// assert!(samples.read_lengths.is_empty());
/// ```
pub fn sample_reads<I>(records: I, sample_size: NonZeroUsize) -> Result<SampleSet>
where
    I: IntoIterator<Item = Result<AlignmentRecord>>,
{
    let n = sample_size.get();
    let capacity = n.min(MAX_PREALLOCATED);
    let mut samples = SampleSet {
        read_lengths: Vec::with_capacity(capacity),
        insert_sizes: Vec::with_capacity(capacity),
        template_lengths: Vec::with_capacity(capacity),
        ..SampleSet::default()
    };
    let progress = ProgressTracker::new("Examined records").with_interval(1_000_000);

    for record in records {
        let record = record?;
        samples.records_examined += 1;
        progress.log_if_needed(1);

        if record.is_excluded() {
            samples.records_filtered += 1;
            continue;
        }

        if samples.read_lengths.len() < n {
            samples.read_lengths.push(record.query_length() as i64);
        }

        if let Some(insert_size) = record.insert_size() {
            samples.insert_sizes.push(insert_size);
            samples.template_lengths.push(i64::from(record.template_length));
            if samples.insert_sizes.len() >= n {
                break;
            }
        }
    }

    progress.log_final();
    Ok(samples)
}
