//! Summary statistics over sample buffers.
//!
//! All functions return `None` for an empty input rather than a NaN or a panic; callers turn that
//! into [`CovmedError::InsufficientSamples`](crate::errors::CovmedError::InsufficientSamples).
//! Standard deviations are population deviations (divide by `n`, not `n - 1`).

use std::fmt;

/// Offset applied to the read-length median.
///
/// Read lengths are sampled as one past the zero-based coordinate of the last read base, so the
/// reported median is shifted down by one. Coverage is computed from this shifted value.
pub const READ_LENGTH_MEDIAN_OFFSET: f64 = 1.0;

/// Arithmetic mean of `xs`, or `None` if `xs` is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(xs: &[i64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let n = xs.len() as f64;
    Some(xs.iter().map(|&x| x as f64).sum::<f64>() / n)
}

/// Population standard deviation of `xs`, or `None` if `xs` is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn population_std(xs: &[i64]) -> Option<f64> {
    let mu = mean(xs)?;
    let n = xs.len() as f64;
    let variance = xs.iter().map(|&x| (x as f64 - mu).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

/// Mean and population standard deviation of `xs` in one call.
#[must_use]
pub fn mean_std(xs: &[i64]) -> Option<(f64, f64)> {
    Some((mean(xs)?, population_std(xs)?))
}

/// Lower median of the read lengths minus [`READ_LENGTH_MEDIAN_OFFSET`].
///
/// Sorts `xs` in place and takes the element at index `(len - 1) / 2`, so even-length inputs use
/// the lower of the two middle values.
///
/// # Examples
///
/// ```
/// use covmed_lib::stats::read_length_median;
///
/// let mut lengths = vec![6, 2, 4];
/// assert_eq!(read_length_median(&mut lengths), Some(3.0));
/// assert_eq!(read_length_median(&mut []), None);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn read_length_median(xs: &mut [i64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    xs.sort_unstable();
    Some(xs[(xs.len() - 1) / 2] as f64 - READ_LENGTH_MEDIAN_OFFSET)
}

/// Insert-size, template-length and read-length statistics for one BAM.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sizes {
    /// Mean distance from read end to mate start
    pub insert_mean: f64,
    /// Population SD of the insert size
    pub insert_sd: f64,
    /// Mean aligner-reported template length
    pub template_mean: f64,
    /// Population SD of the template length
    pub template_sd: f64,
    /// Mean query-consumed read length
    pub read_length_mean: f64,
    /// Read-length median, offset by [`READ_LENGTH_MEDIAN_OFFSET`]
    pub read_length_median: f64,
}

/// Tab-separated insert and template statistics with two decimals, as printed on the report line.
impl fmt::Display for Sizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}\t{:.2}\t{:.2}\t{:.2}",
            self.insert_mean, self.insert_sd, self.template_mean, self.template_sd
        )
    }
}
