//! Tabular input decoding for uploaded files

use std::path::Path;

use crate::error::PipelineError;

pub mod delimited;
pub mod spreadsheet;
pub mod workbook;

pub use delimited::TEXT_SHEET_NAME;
pub use workbook::{Sheet, Workbook};

/// Extensions decoded as full spreadsheet workbooks. Anything else is
/// treated as delimited text.
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Decode an uploaded file into named sheets of string cells.
///
/// Classification is by filename extension: spreadsheet formats keep all
/// their sheets, everything else goes through the delimited-text decoder
/// and comes back as a single sheet.
pub fn read_tabular(name: &str, bytes: &[u8]) -> Result<Workbook, PipelineError> {
    if is_spreadsheet(name) {
        spreadsheet::read_workbook(name, bytes)
    } else {
        delimited::read_delimited(name, bytes)
    }
}

fn is_spreadsheet(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
}
