//! Alignment records as seen by the sampler.
//!
//! [`AlignmentRecord`] keeps only the fields the sampling pass reads, with positions converted to
//! zero-based coordinates. Records are built from `noodles` [`RecordBuf`]s by the BAM reader in
//! [`crate::bam_io`], or directly in tests.

use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record_buf::RecordBuf;

/// Flags that exclude a record from every sample buffer.
pub const EXCLUDED_FLAGS: Flags = Flags::SECONDARY
    .union(Flags::SUPPLEMENTARY)
    .union(Flags::UNMAPPED)
    .union(Flags::QC_FAIL);

/// A single alignment reduced to the fields used for size sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    /// SAM flags
    pub flags: Flags,
    /// Zero-based leftmost mapping position
    pub position: Option<i64>,
    /// Zero-based leftmost mapping position of the mate
    pub mate_position: Option<i64>,
    /// Zero-based, exclusive end of the alignment on the reference
    pub alignment_end: Option<i64>,
    /// Signed template length reported by the aligner
    pub template_length: i32,
    /// Alignment blocks
    pub cigar: Vec<Op>,
}

impl AlignmentRecord {
    /// Returns true if the record is secondary, supplementary, unmapped or QC-failed.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.flags.intersects(EXCLUDED_FLAGS)
    }

    /// Sum of the lengths of all cigar operations that consume read bases.
    #[must_use]
    pub fn query_length(&self) -> usize {
        self.cigar.iter().filter(|op| op.kind().consumes_read()).map(|op| op.len()).sum()
    }

    /// Returns true if the alignment is a single ungapped, unclipped match block.
    #[must_use]
    pub fn is_single_match(&self) -> bool {
        matches!(self.cigar.as_slice(), [op] if op.kind() == Kind::Match)
    }

    /// Distance from the end of this alignment to the start of the mate, if this record is the
    /// leftmost read of a properly paired, cleanly aligned pair.
    ///
    /// Returns `None` for any record that does not qualify for insert-size sampling.
    #[must_use]
    pub fn insert_size(&self) -> Option<i64> {
        let (position, mate_position) = (self.position?, self.mate_position?);
        if position < mate_position && self.flags.is_properly_segmented() && self.is_single_match()
        {
            Some(mate_position - self.alignment_end?)
        } else {
            None
        }
    }
}

impl From<&RecordBuf> for AlignmentRecord {
    #[allow(clippy::cast_possible_wrap)]
    fn from(record: &RecordBuf) -> Self {
        // noodles positions are 1-based; a 1-based inclusive end is the 0-based exclusive end
        let zero_based = |p: noodles::core::Position| usize::from(p) as i64 - 1;
        Self {
            flags: record.flags(),
            position: record.alignment_start().map(zero_based),
            mate_position: record.mate_alignment_start().map(zero_based),
            alignment_end: record.alignment_end().map(|p| usize::from(p) as i64),
            template_length: record.template_length(),
            cigar: record.cigar().as_ref().to_vec(),
        }
    }
}
