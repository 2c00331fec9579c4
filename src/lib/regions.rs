//! Target region lengths from BED-like interval lists.
//!
//! Each non-empty line holds at least `chrom`, `start` and `end` separated by tabs, with zero-based
//! half-open coordinates. Only the first five fields are split off; anything after the fourth tab
//! stays in the fifth field. Gzip-compressed files are read transparently.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use fgoxide::io::Io;

use crate::errors::CovmedError;

/// Maximum number of tab-separated fields split from each line.
const MAX_FIELDS: usize = 5;

/// Minimum number of fields a region line must have.
const MIN_FIELDS: usize = 3;

/// Read buffer size for region files.
const BUFFER_SIZE: usize = 64 * 1024;

/// Sums `end - start` over every interval in the file at `path`.
///
/// Overlapping intervals are not merged; each line counts in full.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or
/// [`CovmedError::InvalidRegion`] for the first line with fewer than three fields or a
/// non-integer start or end. No partial total is returned.
pub fn read_region_length<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();
    let reader = Io::new(5, BUFFER_SIZE)
        .new_reader(path)
        .with_context(|| format!("Failed to open region file: {}", path.display()))?;
    sum_region_lengths(reader, &path.display().to_string())
}

/// Sums interval lengths from an already-open reader; `source` names it in errors.
pub(crate) fn sum_region_lengths<R: BufRead>(reader: R, source: &str) -> Result<u64> {
    let mut total: i64 = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read region file: {source}"))?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() {
            continue;
        }
        let invalid = |reason| CovmedError::InvalidRegion {
            path: source.to_string(),
            line_number: index + 1,
            reason,
        };
        let length = interval_length(line).map_err(invalid)?;
        total = total
            .checked_add(length)
            .ok_or_else(|| invalid(format!("total region length overflows at {length} bases")))?;
    }

    // Intervals with end < start subtract from the total; only a negative sum is rejected
    u64::try_from(total).map_err(|_| {
        CovmedError::InvalidFileFormat {
            file_type: "region".to_string(),
            path: source.to_string(),
            reason: format!("total region length is negative ({total})"),
        }
        .into()
    })
}

/// Parses one line into `end - start`.
fn interval_length(line: &str) -> std::result::Result<i64, String> {
    let fields: Vec<&str> = line.splitn(MAX_FIELDS, '\t').collect();
    if fields.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {MIN_FIELDS} tab-separated fields, found {}",
            fields.len()
        ));
    }
    let parse = |name: &str, value: &str| {
        value.parse::<i64>().map_err(|e| format!("invalid {name} '{value}': {e}"))
    };
    let start = parse("start", fields[1])?;
    let end = parse("end", fields[2])?;
    end.checked_sub(start).ok_or_else(|| format!("interval {start}-{end} overflows"))
}
