//! Logging utilities for formatted output.
//!
//! Consistent number, duration and rate formatting for progress messages, plus the end-of-run
//! summary of what was sampled and estimated.

use std::time::{Duration, Instant};

use crate::coverage::CoverageReport;

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use covmed_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a duration in human-readable form.
///
/// # Examples
///
/// ```
/// use covmed_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);
    match (hours, minutes, seconds) {
        (0, 0, s) => format!("{s}s"),
        (0, m, 0) => format!("{m}m"),
        (0, m, s) => format!("{m}m {s}s"),
        (h, 0, _) => format!("{h}h"),
        (h, m, _) => format!("{h}h {m}m"),
    }
}

/// Formats a rate (records per second).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        format!("{:.1} records/min", count as f64 / (secs / 60.0))
    }
}

/// Logs the sampled buffer sizes and the resulting estimate.
pub fn log_estimate_summary(report: &CoverageReport) {
    let samples = &report.samples;
    log::info!("Coverage Estimate Summary:");
    log::info!("  Records examined: {}", format_count(samples.records_examined));
    log::info!("  Records filtered: {}", format_count(samples.records_filtered));
    log::info!("  Read lengths sampled: {}", format_count(samples.read_lengths as u64));
    log::info!("  Insert sizes sampled: {}", format_count(samples.insert_sizes as u64));
    log::info!("  Mapped reads (index): {}", format_count(report.totals.mapped_reads));
    log::info!("  Total bases: {}", format_count(report.totals.total_bases));
    if !report.totals.missing.is_empty() {
        log::info!("  References missing from index: {}", report.totals.missing.len());
    }
    log::info!(
        "  Read length mean/median: {:.2}/{:.2}",
        report.sizes.read_length_mean,
        report.sizes.read_length_median
    );
    log::info!("  Insert size mean/sd: {:.2}/{:.2}", report.sizes.insert_mean, report.sizes.insert_sd);
    log::info!(
        "  Template length mean/sd: {:.2}/{:.2}",
        report.sizes.template_mean,
        report.sizes.template_sd
    );
    log::info!("  Coverage: {:.2}", report.coverage);
}

/// Wall-clock timer for one stage of the run, logged at start and at completion.
///
/// # Examples
///
/// ```no_run
/// use covmed_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Sampling reads");
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    label: String,
    started: Instant,
}

impl OperationTimer {
    /// Starts timing `label`.
    #[must_use]
    pub fn new(label: &str) -> Self {
        log::info!("{label} ...");
        Self { label: label.to_owned(), started: Instant::now() }
    }

    /// Time since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Logs `count` records processed, with the elapsed time and rate.
    pub fn log_completion(&self, count: u64) {
        let elapsed = self.elapsed();
        let (records, took, rate) =
            (format_count(count), format_duration(elapsed), format_rate(count, elapsed));
        log::info!("{} completed: {records} records in {took} ({rate})", self.label);
    }
}
