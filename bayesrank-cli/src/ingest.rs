//! Dataset ingestion: cleaning raw dumps and loading processed files.
//!
//! Malformed rows are dropped here, so the core only ever sees well-typed
//! records.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use bayesrank_core::Record;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info, warn};

use crate::error::{CliError, Result};

/// Header of a processed dataset.
pub const PROCESSED_HEADER: [&str; 3] = ["Organization", "Rating", "NumberReview"];

/// Raw dump columns by header name, with the position used when the header
/// does not name them.
const RAW_COLUMNS: [(&str, usize); 3] = [("organization", 3), ("rating", 5), ("num_reviews", 6)];

/// Processed rows loaded into memory.
#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Row counts from a cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub kept: usize,
    pub dropped: usize,
}

/// Strip stray double quotes and surrounding whitespace.
pub fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

pub fn parse_rating(raw: &str) -> Option<f64> {
    let rating: f64 = clean_field(raw).parse().ok()?;
    rating.is_finite().then_some(rating)
}

/// Accepts plain integers and integral decimals such as `"12.0"`.
pub fn parse_review_count(raw: &str) -> Option<u32> {
    let cleaned = clean_field(raw);
    if let Ok(count) = cleaned.parse::<u32>() {
        return Some(count);
    }
    let count: f64 = cleaned.parse().ok()?;
    let integral = count.is_finite() && count >= 0.0 && count.fract() == 0.0;
    (integral && count <= f64::from(u32::MAX)).then_some(count as u32)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| clean_field(h).eq_ignore_ascii_case(name))
}

/// Extract (name, rating, review count) from a row, or `None` if any part is unusable.
fn parse_row(row: &StringRecord, [name_idx, rating_idx, count_idx]: [usize; 3]) -> Option<Record> {
    let name = clean_field(row.get(name_idx)?);
    if name.is_empty() {
        return None;
    }
    let rating = parse_rating(row.get(rating_idx)?)?;
    let review_count = parse_review_count(row.get(count_idx)?)?;
    Some(Record::new(name, rating, review_count))
}

fn row_line(row: &StringRecord) -> u64 {
    row.position().map_or(0, |p| p.line())
}

/// Rows that are not valid UTF-8 count as malformed. Anything else the CSV
/// reader reports is fatal.
fn is_row_level(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Utf8 { .. })
}

// ---------------------------------------------------------------------------
// Processed datasets
// ---------------------------------------------------------------------------

/// Load a processed dataset (`Organization,Rating,NumberReview`) from disk.
pub fn load_processed(path: &Path) -> Result<LoadReport> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    let report = read_processed(file, path)?;
    info!(
        path = %path.display(),
        records = report.records.len(),
        skipped = report.skipped,
        "loaded processed dataset"
    );
    Ok(report)
}

/// Parse a processed dataset. `path` is used for error messages only.
///
/// Columns are found by header name, case-insensitively, so extra columns
/// (a stale score column, for instance) are ignored.
pub fn read_processed<R: Read>(reader: R, path: &Path) -> Result<LoadReport> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().map_err(|e| CliError::csv(path, e))?.clone();

    let mut columns = [0usize; 3];
    for (slot, column) in columns.iter_mut().zip(PROCESSED_HEADER) {
        *slot = find_column(&headers, column)
            .ok_or_else(|| CliError::MissingColumn { path: path.to_path_buf(), column })?;
    }

    let mut records = Vec::new();
    let mut skipped = 0;
    for result in rdr.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if is_row_level(&e) => {
                skipped += 1;
                debug!(error = %e, "skipping undecodable row");
                continue;
            }
            Err(e) => return Err(CliError::csv(path, e)),
        };
        match parse_row(&row, columns) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!(line = row_line(&row), "skipping malformed row");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, path = %path.display(), "skipped malformed rows");
    }
    Ok(LoadReport { records, skipped })
}

// ---------------------------------------------------------------------------
// Raw dumps
// ---------------------------------------------------------------------------

/// Clean a raw dump into a processed dataset on disk.
pub fn clean_raw(raw: &Path, out: &Path) -> Result<CleanReport> {
    let input = File::open(raw).map_err(|e| CliError::io(raw, e))?;
    let output = File::create(out).map_err(|e| CliError::io(out, e))?;
    let report = clean_records(input, output, raw, out)?;
    info!(
        raw = %raw.display(),
        out = %out.display(),
        kept = report.kept,
        dropped = report.dropped,
        "cleaned raw dataset"
    );
    Ok(report)
}

/// Copy name, rating and review count out of a raw dump, dropping unusable rows.
///
/// Columns are located by the header names `organization`, `rating` and
/// `num_reviews`, falling back to positions 3, 5 and 6.
pub fn clean_records<R: Read, W: Write>(reader: R, writer: W, raw: &Path, out: &Path) -> Result<CleanReport> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let headers = rdr.headers().map_err(|e| CliError::csv(raw, e))?.clone();
    let columns = RAW_COLUMNS.map(|(name, fallback)| {
        find_column(&headers, name).unwrap_or_else(|| {
            debug!(column = name, fallback, "raw header lacks column, using position");
            fallback
        })
    });

    wtr.write_record(PROCESSED_HEADER).map_err(|e| CliError::csv(out, e))?;

    let mut report = CleanReport { kept: 0, dropped: 0 };
    for result in rdr.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if is_row_level(&e) => {
                report.dropped += 1;
                continue;
            }
            Err(e) => return Err(CliError::csv(raw, e)),
        };
        let Some(record) = parse_row(&row, columns) else {
            report.dropped += 1;
            debug!(line = row_line(&row), "dropping raw row");
            continue;
        };

        let rating = record.rating.to_string();
        let count = record.review_count.to_string();
        wtr.write_record([record.name.as_str(), rating.as_str(), count.as_str()])
            .map_err(|e| CliError::csv(out, e))?;
        report.kept += 1;
    }

    wtr.flush().map_err(|e| CliError::io(out, e))?;
    Ok(report)
}
