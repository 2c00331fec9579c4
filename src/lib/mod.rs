#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: read lengths, counts and positions move between integer and float types
// - missing_*_doc: Documentation improvements tracked separately
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args
)]

//! # covmed - coverage and insert-size estimation for indexed BAM files
//!
//! Estimates mean sequencing depth from the BAM index's per-reference mapped-read counts and a
//! sampled read-length median, and reports insert-size and template-length statistics from the
//! first qualifying proper pairs in the file.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`sampler`]** - Single-pass sampling of read, insert and template lengths
//! - **[`stats`]** - Mean, population SD and the read-length median
//! - **[`coverage`]** - The estimate itself and the one-line report
//!
//! ### Inputs
//!
//! - **[`bam_io`]** - BAM reading and BAI index location
//! - **[`record`]** - The alignment fields the sampler looks at
//! - **[`reference`][mod@reference]** - Per-reference mapped counts and genome length
//! - **[`regions`]** - Target region lengths from BED-like files
//!
//! ### Utilities
//!
//! - **[`validation`]** - Input validation for parameters and files
//! - **[`progress`]** - Progress logging during the sampling pass
//! - **[`logging`]** - Number formatting, timing and the run summary
//! - **[`errors`]** - Typed errors for the failure modes above
//!
//! ## Quick Start
//!
//! ```no_run
//! use covmed_lib::coverage::{EstimateOptions, estimate};
//!
//! # fn main() -> anyhow::Result<()> {
//! let report = estimate(&EstimateOptions::new("sample.bam"))?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod bam_io;
pub mod coverage;
pub mod errors;
pub mod logging;
pub mod progress;
pub mod record;
pub mod reference;
pub mod regions;
pub mod sampler;
pub mod stats;
pub mod validation;
