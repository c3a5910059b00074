//! Shared row handling for the CSV loaders

use std::io;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::simulation::states::NVec3;

/// Parsed rows plus how many were dropped
#[derive(Debug, Clone)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Line number of a record, 0 if unknown
pub(crate) fn line_of(rec: &StringRecord) -> u64 {
    rec.position().map(|p| p.line()).unwrap_or(0)
}

pub(crate) fn malformed(rec: &StringRecord, reason: impl Into<String>) -> SimError {
    SimError::MalformedRecord {
        line: line_of(rec),
        reason: reason.into(),
    }
}

/// Finite f64 at column `idx`
pub(crate) fn field_f64(rec: &StringRecord, idx: usize) -> SimResult<f64> {
    let raw = rec
        .get(idx)
        .ok_or_else(|| malformed(rec, format!("missing column {idx}")))?;
    let v: f64 = raw
        .parse()
        .map_err(|_| malformed(rec, format!("column {idx}: '{raw}' is not a number")))?;
    if !v.is_finite() {
        return Err(malformed(rec, format!("column {idx}: non-finite value")));
    }
    Ok(v)
}

/// Three consecutive numeric columns starting at `idx`
pub(crate) fn field_vec3(rec: &StringRecord, idx: usize) -> SimResult<NVec3> {
    Ok(NVec3::new(
        field_f64(rec, idx)?,
        field_f64(rec, idx + 1)?,
        field_f64(rec, idx + 2)?,
    ))
}

pub(crate) fn expect_len(rec: &StringRecord, n: usize) -> SimResult<()> {
    if rec.len() != n {
        return Err(malformed(rec, format!("expected {n} fields, found {}", rec.len())));
    }
    Ok(())
}

/// Read every row of a headed CSV through `parse`.
/// Rows that fail to parse are logged and counted, I/O errors abort.
pub(crate) fn read_rows<R, T, P>(reader: R, what: &str, parse: P) -> SimResult<LoadReport<T>>
where
    R: io::Read,
    P: Fn(&StringRecord) -> SimResult<T>,
{
    // Header row is required; ragged rows reach `parse` and fail there
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let rec = match result {
            Ok(rec) => rec,
            // A failing reader aborts the load, a bad row only skips
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("skipping unreadable {} row: {}", what, e);
                skipped += 1;
                continue;
            }
        };
        // Field-level problems (missing column, bad number) also skip
        match parse(&rec) {
            Ok(item) => records.push(item),
            Err(e) => {
                warn!("skipping {} row: {}", what, e);
                skipped += 1;
            }
        }
    }

    Ok(LoadReport { records, skipped })
}
