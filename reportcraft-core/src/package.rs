//! CSV serialization and zip assembly for finished reports

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::FileOptions;

use crate::error::PipelineError;

/// Byte-order mark so spreadsheet tools auto-detect UTF-8 on open.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Archive entry name for one day's report.
pub fn entry_name(date: &str) -> String {
    format!("{date}_日报表.csv")
}

/// Pack every day's projected rows into one deflate-compressed archive,
/// one BOM-prefixed CSV entry per day.
pub fn package_reports(reports: &[(String, Vec<Vec<String>>)]) -> Result<Vec<u8>, PipelineError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default();

    for (date, rows) in reports {
        zip.start_file(entry_name(date), options)?;
        zip.write_all(UTF8_BOM).map_err(ZipError::from)?;
        zip.write_all(&csv_bytes(rows)?).map_err(ZipError::from)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Comma-delimited text with CRLF row endings and standard quoting.
fn csv_bytes(rows: &[Vec<String>]) -> Result<Vec<u8>, PipelineError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    for row in rows {
        if row.is_empty() {
            // An empty template row still takes a line, keeping the row
            // numbering of the template intact.
            writer.write_record([""])?;
        } else {
            writer.write_record(row)?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| PipelineError::ReportSerialize(e.into_error().into()))
}
