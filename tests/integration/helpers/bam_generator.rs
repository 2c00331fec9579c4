//! Utilities for generating test BAM data programmatically.

use std::fs::File;
use std::path::{Path, PathBuf};

use bstr::BString;
use noodles::bam;
use noodles::bam::bai;
use noodles::core::Position;
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record::MappingQuality;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record_buf::{Cigar, RecordBuf, Sequence};

/// Read length used by every generated record.
pub const READ_LENGTH: usize = 100;

/// Coordinate-sorted header with `chr1` (10,000 bp) and `chr2` (5,000 bp).
pub fn create_test_header() -> Header {
    "@HD\tVN:1.6\tSO:coordinate\n@SQ\tSN:chr1\tLN:10000\n@SQ\tSN:chr2\tLN:5000\n"
        .parse()
        .expect("Failed to parse header")
}

/// A mapped `READ_LENGTH`M record on `chr1` at 1-based `start`.
pub fn mapped_record(name: &str, flags: Flags, start: usize) -> RecordBuf {
    RecordBuf::builder()
        .set_name(BString::from(name))
        .set_flags(flags)
        .set_reference_sequence_id(0)
        .set_alignment_start(Position::try_from(start).expect("start must be positive"))
        .set_mapping_quality(MappingQuality::new(60).expect("valid mapping quality"))
        .set_cigar(Cigar::from(vec![Op::new(Kind::Match, READ_LENGTH)]))
        .set_sequence(Sequence::from(vec![b'A'; READ_LENGTH]))
        .build()
}

/// Creates `count` proper pairs on `chr1`.
///
/// R1 of pair `i` starts at `100 + 10 * i` and R2 at `400 + 10 * i` (1-based), so every pair has
/// an insert size of 200 and a template length of 400. Records are returned in coordinate order.
pub fn create_proper_pairs(count: usize) -> Vec<RecordBuf> {
    let base = Flags::SEGMENTED.union(Flags::PROPERLY_SEGMENTED);
    let mut r1s = Vec::with_capacity(count);
    let mut r2s = Vec::with_capacity(count);

    for i in 0..count {
        let name = format!("pair_{i}");
        let r1_start = 100 + 10 * i;
        let r2_start = 400 + 10 * i;

        let mut r1 = mapped_record(
            &name,
            base.union(Flags::FIRST_SEGMENT).union(Flags::MATE_REVERSE_COMPLEMENTED),
            r1_start,
        );
        set_mate(&mut r1, r2_start, 400);

        let mut r2 = mapped_record(
            &name,
            base.union(Flags::LAST_SEGMENT).union(Flags::REVERSE_COMPLEMENTED),
            r2_start,
        );
        set_mate(&mut r2, r1_start, -400);

        r1s.push(r1);
        r2s.push(r2);
    }

    r1s.into_iter().chain(r2s).collect()
}

fn set_mate(record: &mut RecordBuf, mate_start: usize, template_length: i32) {
    *record.mate_reference_sequence_id_mut() = Some(0);
    *record.mate_alignment_start_mut() =
        Some(Position::try_from(mate_start).expect("mate start must be positive"));
    *record.template_length_mut() = template_length;
}

/// Writes `records` to `<dir>/<name>` with [`create_test_header`].
pub fn write_bam(dir: &Path, name: &str, records: &[RecordBuf]) -> PathBuf {
    let path = dir.join(name);
    let header = create_test_header();
    let mut writer = bam::io::Writer::new(File::create(&path).expect("Failed to create BAM file"));
    writer.write_header(&header).expect("Failed to write header");
    for record in records {
        writer.write_alignment_record(&header, record).expect("Failed to write record");
    }
    writer.finish(&header).expect("Failed to finish BAM");
    path
}

/// Builds a BAI for the BAM at `bam_path` and writes it to `index_path`.
pub fn write_index(bam_path: &Path, index_path: &Path) {
    let index = bam::fs::index(bam_path).expect("Failed to index BAM");
    let file = File::create(index_path).expect("Failed to create index file");
    bai::io::Writer::new(file).write_index(&index).expect("Failed to write index");
}

/// Writes `records` as `<dir>/<name>` plus a `<name>.bai` index, returning the BAM path.
pub fn write_indexed_bam(dir: &Path, name: &str, records: &[RecordBuf]) -> PathBuf {
    let path = write_bam(dir, name, records);
    write_index(&path, &dir.join(format!("{name}.bai")));
    path
}
