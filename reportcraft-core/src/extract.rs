//! Source-table location and hourly record extraction

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::config::SourceColumns;
use crate::error::PipelineError;
use crate::format::format_measurement;
use crate::reader::{Sheet, Workbook};

/// Sheets with this many rows or fewer are taken for cover/header sheets.
const MIN_DATA_SHEET_ROWS: usize = 5;

/// Rows narrower than this are malformed and skipped.
const MIN_RECORD_COLUMNS: usize = 10;

/// One hour's formatted measurements. A column missing from the source
/// row reads as an empty string, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourlyRecord {
    pub flow: String,
    pub nox: String,
    pub nmhc: String,
    pub o2: String,
    pub velocity: String,
    pub temperature: String,
    pub humidity: String,
}

/// Hour-of-day to record, for a single day.
pub type DayRecords = BTreeMap<u32, HourlyRecord>;

/// Per-day, per-hour records keyed by date, in order of first appearance
/// in the source, plus the valid-row tally for the run summary.
#[derive(Debug, Clone, Default)]
pub struct DailyDataMap {
    days: IndexMap<String, DayRecords>,
    valid_rows: usize,
}

impl DailyDataMap {
    pub fn day(&self, date: &str) -> Option<&DayRecords> {
        self.days.get(date)
    }

    /// Days in insertion order.
    pub fn days(&self) -> impl Iterator<Item = (&str, &DayRecords)> {
        self.days.iter().map(|(date, records)| (date.as_str(), records))
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn valid_rows(&self) -> usize {
        self.valid_rows
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn insert(&mut self, date: String, hour: u32, record: HourlyRecord) {
        self.days.entry(date).or_default().insert(hour, record);
        self.valid_rows += 1;
    }
}

/// Pick the sheet carrying the data table: the first one, in decode
/// order, with more rows than a cover sheet would have.
pub fn locate_data_sheet(workbook: &Workbook) -> Result<&Sheet, PipelineError> {
    workbook
        .sheets
        .iter()
        .find(|sheet| sheet.rows.len() > MIN_DATA_SHEET_ROWS)
        .ok_or_else(|| {
            PipelineError::DataNotFound(
                "every sheet in the source is too short to hold a data table".to_string(),
            )
        })
}

/// Index of the first row opening with a year-prefixed date such as
/// `2025-08-01 00:00` or `2025/08/01`.
pub fn find_data_start(sheet: &Sheet) -> Result<usize, PipelineError> {
    sheet
        .rows
        .iter()
        .position(|row| {
            let first = row.first().map(|cell| cell.trim()).unwrap_or("");
            first.starts_with("20") && (first.contains('-') || first.contains('/'))
        })
        .ok_or_else(|| {
            PipelineError::DataNotFound(format!(
                "no date-prefixed row in sheet '{}'",
                sheet.name
            ))
        })
}

/// Scan rows from the data-start index and build the day map.
///
/// Best-effort per row: anything that fails to parse is skipped without
/// touching the tally, so one corrupt reading never sinks the batch.
pub fn extract_hourly_records(rows: &[Vec<String>], columns: &SourceColumns) -> DailyDataMap {
    let mut data = DailyDataMap::default();
    for row in rows {
        if let Some((date, hour, record)) = parse_row(row, columns) {
            data.insert(date, hour, record);
        }
    }
    data
}

fn parse_row(row: &[String], columns: &SourceColumns) -> Option<(String, u32, HourlyRecord)> {
    if row.len() < MIN_RECORD_COLUMNS {
        return None;
    }

    let stamp = row[0].trim();
    let date: String = stamp.chars().take(10).collect();
    let hour = parse_hour(stamp);

    let field = |index: usize| {
        row.get(index)
            .map(|cell| format_measurement(cell))
            .unwrap_or_default()
    };
    let record = HourlyRecord {
        flow: field(columns.flow),
        nox: field(columns.nox),
        nmhc: field(columns.nmhc),
        o2: field(columns.o2),
        velocity: field(columns.velocity),
        temperature: field(columns.temperature),
        humidity: field(columns.humidity),
    };

    Some((date, hour, record))
}

/// Hour of day parsed from the text between the first space and the next
/// colon. Everything unparseable lands on hour 0.
fn parse_hour(stamp: &str) -> u32 {
    stamp
        .split(' ')
        .nth(1)
        .and_then(|time| time.split(':').next())
        .and_then(|token| token.trim().parse().ok())
        .unwrap_or(0)
}
