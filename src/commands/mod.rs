//! CLI command implementations for covmed.
//!
//! - [`covmed`] - Estimate coverage and insert sizes for an indexed BAM

pub mod command;
pub mod covmed;
