//! Per-reference mapped-read counts and genome length.
//!
//! Mapped-read totals come from the BAM index rather than a full scan. The [`ReferenceIndex`]
//! trait is the only thing the tally needs from an index, so tests can supply counts directly.

use log::warn;
use noodles::bam::bai;
use noodles::csi::binning_index::ReferenceSequence as _;
use noodles::sam::Header;

/// Lookup of mapped-read counts by reference sequence id.
pub trait ReferenceIndex {
    /// Number of mapped records on the reference, or `None` if the index has no statistics for it.
    fn mapped_count(&self, reference_id: usize) -> Option<u64>;
}

impl ReferenceIndex for bai::Index {
    fn mapped_count(&self, reference_id: usize) -> Option<u64> {
        self.reference_sequences()
            .get(reference_id)?
            .metadata()
            .map(|metadata| metadata.mapped_record_count())
    }
}

impl ReferenceIndex for [Option<u64>] {
    fn mapped_count(&self, reference_id: usize) -> Option<u64> {
        self.get(reference_id).copied().flatten()
    }
}

/// A reference sequence as listed in the alignment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceInfo {
    /// Reference sequence name
    pub name: String,
    /// Length in bases
    pub length: u64,
}

/// Lists the header's reference sequences in id order.
#[must_use]
pub fn header_references(header: &Header) -> Vec<ReferenceInfo> {
    header
        .reference_sequences()
        .iter()
        .map(|(name, map)| ReferenceInfo { name: name.to_string(), length: map.length().get() as u64 })
        .collect()
}

/// Mapped reads and genome length summed across the header references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTotals {
    /// Sum of index mapped counts; references missing from the index add zero
    pub mapped_reads: u64,
    /// Sum of header reference lengths, including references missing from the index
    pub total_bases: u64,
    /// Names of references the index had no statistics for
    pub missing: Vec<String>,
}

impl ReferenceTotals {
    /// Replaces the genome length with the total length of a set of target regions.
    #[must_use]
    pub fn with_region_length(mut self, region_length: u64) -> Self {
        self.total_bases = region_length;
        self
    }
}

/// Sums mapped counts from `index` and lengths from `references`.
///
/// A reference with no index statistics logs one warning naming `source` and contributes zero
/// mapped reads. Its length still counts toward `total_bases`.
pub fn tally_references<X>(references: &[ReferenceInfo], index: &X, source: &str) -> ReferenceTotals
where
    X: ReferenceIndex + ?Sized,
{
    let mut totals = ReferenceTotals::default();

    for (reference_id, reference) in references.iter().enumerate() {
        totals.total_bases += reference.length;
        match index.mapped_count(reference_id) {
            Some(count) => totals.mapped_reads += count,
            None => {
                warn!("chromosome: {} not found in {source}", reference.name);
                totals.missing.push(reference.name.clone());
            }
        }
    }

    totals
}
