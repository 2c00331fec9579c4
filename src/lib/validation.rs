//! Input validation utilities
//!
//! Checks run on command-line parameters and input paths before any file is opened, reported
//! through [`CovmedError`] with the parameter or file named in the message.

use std::num::NonZeroUsize;
use std::path::Path;

use crate::errors::{CovmedError, Result};

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input BAM", "Region file")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use covmed_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.bam", "Input BAM");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(CovmedError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that a count is positive, returning it as a [`NonZeroUsize`].
///
/// # Errors
/// Returns an error if `value` is zero
///
/// # Example
/// ```
/// use covmed_lib::validation::validate_positive;
///
/// assert_eq!(validate_positive(100_000, "sample-size").unwrap().get(), 100_000);
/// assert!(validate_positive(0, "sample-size").is_err());
/// ```
pub fn validate_positive(value: usize, name: &str) -> Result<NonZeroUsize> {
    NonZeroUsize::new(value).ok_or_else(|| CovmedError::InvalidParameter {
        parameter: name.to_string(),
        reason: format!("Must be positive, got: {value}"),
    })
}
