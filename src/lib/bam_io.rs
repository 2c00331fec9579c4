//! BAM and BAI file I/O utilities.
//!
//! This module opens the input BAM with consistent error context, adapts its records into
//! [`AlignmentRecord`]s, and locates and loads the companion BAI index.
//!
//! # Threading Model
//!
//! BGZF decompression can run on worker threads (`threads > 1`). Records are still delivered in
//! file order, so the sampling pass is unaffected by the thread count.

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::num::NonZero;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::warn;
use noodles::bam::bai;
use noodles::bgzf::io::{MultithreadedReader, Reader as BgzfReader};
use noodles::sam::Header;
use noodles::sam::header::record::value::map::header::sort_order::COORDINATE;

use crate::record::AlignmentRecord;

/// Suffix of a BAM index file.
const BAI_SUFFIX: &str = ".bai";

/// Number of trailing characters (the `.bam` extension) removed for the fallback index path.
const BAM_EXTENSION_LEN: usize = 4;

/// Decompressed BGZF stream of a BAM file, inflated on the calling thread or on workers.
pub enum BgzfSource {
    Inline(BgzfReader<File>),
    Workers(MultithreadedReader<File>),
}

impl BgzfSource {
    fn inner(&mut self) -> &mut dyn BufRead {
        match self {
            Self::Inline(reader) => reader,
            Self::Workers(reader) => reader,
        }
    }
}

impl Read for BgzfSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner().read(buf)
    }
}

impl BufRead for BgzfSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner().fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner().consume(amt);
    }
}

/// BAM reader over either kind of [`BgzfSource`].
pub type BamReader = noodles::bam::io::Reader<BgzfSource>;

/// Create a BAM reader and read its header.
///
/// # Arguments
/// * `path` - Path to the input BAM file
/// * `threads` - Number of decompression threads (1 = single-threaded)
///
/// # Errors
/// Returns an error if the file cannot be opened or the header cannot be read
///
/// # Example
/// ```no_run
/// use covmed_lib::bam_io::create_bam_reader;
///
/// let (mut reader, header) = create_bam_reader("input.bam", 1).unwrap();
/// ```
pub fn create_bam_reader<P: AsRef<Path>>(
    path: P,
    threads: usize,
) -> Result<(BamReader, Header)> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open input BAM: {}", path_ref.display()))?;

    let bgzf_reader = match NonZero::new(threads) {
        Some(worker_count) if threads > 1 => {
            BgzfSource::Workers(MultithreadedReader::with_worker_count(worker_count, file))
        }
        _ => BgzfSource::Inline(BgzfReader::new(file)),
    };

    let mut reader = noodles::bam::io::Reader::from(bgzf_reader);
    let header = reader
        .read_header()
        .with_context(|| format!("Failed to read header from: {}", path_ref.display()))?;

    Ok((reader, header))
}

/// Checks if a BAM header declares coordinate sort order (`SO:coordinate`).
#[must_use]
pub fn is_coordinate_sorted(header: &Header) -> bool {
    header.header().is_some_and(|hdr_map| {
        hdr_map
            .other_fields()
            .get(b"SO")
            .is_some_and(|so| <_ as AsRef<[u8]>>::as_ref(so) == COORDINATE)
    })
}

/// Logs a warning if the BAM header does not declare coordinate sort order.
///
/// Sampling still runs, but index counts and stream order are only meaningful for a
/// coordinate-sorted, indexed BAM.
pub fn check_coordinate_sort(header: &Header, path: &Path) {
    if !is_coordinate_sorted(header) {
        warn!(
            "Input file {} does not appear to be coordinate sorted per the SAM header.",
            path.display()
        );
        warn!("Continuing, but your output may be incorrect.");
    }
}

/// Streams the reader's records as [`AlignmentRecord`]s.
///
/// Decoding errors are yielded with the BAM path attached, and end the sampling pass.
pub fn alignment_records<'a, R: Read>(
    reader: &'a mut noodles::bam::io::Reader<R>,
    header: &'a Header,
    path: &'a Path,
) -> impl Iterator<Item = Result<AlignmentRecord>> + 'a {
    reader.record_bufs(header).map(move |result| {
        result
            .map(|record| AlignmentRecord::from(&record))
            .with_context(|| format!("Failed to read record from: {}", path.display()))
    })
}

/// Candidate index paths for a BAM: `<path>.bai`, then `<path minus ".bam">.bai`.
#[must_use]
pub fn bam_index_candidates(path: &Path) -> Vec<PathBuf> {
    let path_str = path.to_string_lossy();
    let mut candidates = vec![PathBuf::from(format!("{path_str}{BAI_SUFFIX}"))];

    let char_count = path_str.chars().count();
    if char_count > BAM_EXTENSION_LEN {
        let stem: String = path_str.chars().take(char_count - BAM_EXTENSION_LEN).collect();
        candidates.push(PathBuf::from(format!("{stem}{BAI_SUFFIX}")));
    }

    candidates
}

/// Finds the first existing index file for the BAM at `path`.
///
/// # Errors
/// Returns an error listing every candidate if none exists.
pub fn locate_bam_index<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let candidates = bam_index_candidates(path.as_ref());
    if let Some(found) = candidates.iter().find(|candidate| candidate.is_file()) {
        return Ok(found.clone());
    }

    let tried: Vec<String> = candidates.iter().map(|c| c.display().to_string()).collect();
    bail!(
        "No BAM index found for {}; tried: {}",
        path.as_ref().display(),
        tried.join(", ")
    )
}

/// Read a BAI index from a file.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not a valid BAI index.
pub fn read_bai_index<P: AsRef<Path>>(path: P) -> Result<bai::Index> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open index file: {}", path_ref.display()))?;
    let mut reader = bai::io::Reader::new(file);
    reader.read_index().with_context(|| format!("Failed to read index from: {}", path_ref.display()))
}
