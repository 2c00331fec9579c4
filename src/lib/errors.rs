//! Custom error types for covmed operations.

use std::fmt;

use thiserror::Error;

/// Result type alias for covmed operations
pub type Result<T> = std::result::Result<T, CovmedError>;

/// The sample buffers filled during the sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Query-consumed read lengths
    ReadLength,
    /// Gap between the end of a read and the start of its mate
    InsertSize,
    /// Aligner-reported template lengths
    TemplateLength,
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleKind::ReadLength => "read length",
            SampleKind::InsertSize => "insert size",
            SampleKind::TemplateLength => "template length",
        };
        f.write_str(name)
    }
}

/// Error type for covmed operations
#[derive(Error, Debug)]
pub enum CovmedError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "BAM", "BAI")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Malformed line in a region file
    #[error("Invalid region on line {line_number} of '{path}': {reason}")]
    InvalidRegion {
        /// Path to the region file
        path: String,
        /// 1-based line number
        line_number: usize,
        /// Explanation of the problem
        reason: String,
    },

    /// A sample buffer ended the pass with no entries
    #[error("Insufficient samples: no {sample} values were collected")]
    InsufficientSamples {
        /// The empty buffer
        sample: SampleKind,
    },

    /// Coverage denominator is zero
    #[error("Total bases is zero: cannot estimate coverage")]
    ZeroTotalBases,
}
