//! Integration tests for covmed.
//!
//! These tests build small BAM and BAI files in a temporary directory and run the `covmed`
//! binary end to end.

mod helpers;
mod test_covmed_command;
mod test_estimate;
