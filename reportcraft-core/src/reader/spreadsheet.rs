//! Excel/ODS decoding via calamine

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDateTime;
use std::io::Cursor;

use super::workbook::{Sheet, Workbook};
use crate::error::PipelineError;

/// Decode workbook bytes into string grids, preserving sheet order.
///
/// The container format is sniffed from the bytes themselves, so a
/// mislabelled extension within the spreadsheet family still opens.
pub fn read_workbook(name: &str, bytes: &[u8]) -> Result<Workbook, PipelineError> {
    let mut excel = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        PipelineError::FileFormat {
            name: name.to_string(),
            reason: e.to_string(),
        }
    })?;

    let sheet_names = excel.sheet_names().to_owned();
    let mut workbook = Workbook::new();
    for sheet_name in &sheet_names {
        let range =
            excel
                .worksheet_range(sheet_name)
                .map_err(|e| PipelineError::FileFormat {
                    name: name.to_string(),
                    reason: format!("sheet '{sheet_name}': {e}"),
                })?;
        workbook.push(Sheet::new(sheet_name.clone(), grid_from_range(&range)));
    }
    Ok(workbook)
}

/// Flatten a calamine range into rows of strings, padded back to the
/// sheet's absolute origin. Row indexes must match the sheet's visible
/// layout because the template anchor offsets are absolute.
fn grid_from_range(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row = vec![String::new(); start_col as usize];
        row.extend(cells.iter().map(cell_text));
        rows.push(row);
    }
    rows
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        // Rendered like a textual timestamp so the extractor's date/hour
        // parsing sees the same shape for typed and string cells.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) => render_timestamp(ts),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

fn render_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_grid_padded_to_absolute_origin() {
        // Used range starting at B3 (row 2, col 1).
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("标题".to_string()));
        range.set_value((3, 2), Data::Int(7));

        let grid = grid_from_range(&range);
        assert_eq!(grid.len(), 4);
        assert!(grid[0].is_empty());
        assert!(grid[1].is_empty());
        assert_eq!(grid[2], vec!["", "标题", ""]);
        assert_eq!(grid[3], vec!["", "", "7"]);
    }

    #[test]
    fn test_empty_range_gives_no_rows() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }

    #[test]
    fn test_cell_text_variants() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("流量".to_string())), "流量");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
        assert_eq!(
            cell_text(&Data::DateTimeIso("2025-08-01T03:00:00".to_string())),
            "2025-08-01T03:00:00"
        );
    }

    #[test]
    fn test_render_timestamp_matches_extractor_shape() {
        let ts = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(3, 0, 0).unwrap());
        assert_eq!(render_timestamp(ts), "2025-08-01 03:00:00");
    }
}
