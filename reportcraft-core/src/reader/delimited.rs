//! Delimited-text decoding with ordered encoding attempts

use encoding_rs::{GB18030, GBK, UTF_8};

use super::workbook::{Sheet, Workbook};
use crate::error::PipelineError;

/// Sheet name given to decoded delimited-text content.
pub const TEXT_SHEET_NAME: &str = "CSV_Content";

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Decode text bytes as a single comma-delimited sheet.
///
/// The first candidate that both decodes strictly and parses as CSV wins;
/// a candidate that decodes but fails to parse falls through to the next
/// one. If every candidate fails the file is unreadable.
pub fn read_delimited(name: &str, bytes: &[u8]) -> Result<Workbook, PipelineError> {
    for text in decode_candidates(bytes) {
        let Ok(rows) = parse_rows(&text) else {
            continue;
        };
        let mut workbook = Workbook::new();
        workbook.push(Sheet::new(TEXT_SHEET_NAME, rows));
        return Ok(workbook);
    }
    Err(PipelineError::FileFormat {
        name: name.to_string(),
        reason: "text is not valid UTF-8, GBK, or GB18030".to_string(),
    })
}

/// Strict decode attempts in contract order: UTF-8, GBK, GB18030, then
/// UTF-8 with the byte-order mark stripped. The trailing attempt only
/// matters when plain UTF-8 already failed; a BOM that decodes as plain
/// UTF-8 rides along as part of the first cell.
fn decode_candidates(bytes: &[u8]) -> Vec<String> {
    let mut candidates = Vec::new();
    for encoding in [UTF_8, GBK, GB18030] {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            candidates.push(text.into_owned());
        }
    }
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(rest) {
            candidates.push(text.into_owned());
        }
    }
    candidates
}

fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
