//! Per-day projection of extracted records onto the template grid

use crate::config::TargetColumns;
use crate::extract::DayRecords;

/// Hour rows are padded at least this wide before any data lands.
const MIN_REPORT_COLUMNS: usize = 10;

/// Hour slots following the fill-start row, one per hour of day.
const HOUR_SLOTS: u32 = 24;

/// Clone the template rows and write one day of hourly records into them.
///
/// The anchor row's first cell takes the date key; `fill_offset` rows
/// below it begin the 24 hour slots. Hours missing from `records` leave
/// their row as copied, and a template shorter than the slot range is
/// truncated silently.
pub fn project_day(
    template_rows: &[Vec<String>],
    anchor_row: usize,
    date: &str,
    records: &DayRecords,
    columns: &TargetColumns,
    fill_offset: usize,
) -> Vec<Vec<String>> {
    let mut rows = template_rows.to_vec();

    if let Some(first) = rows.get_mut(anchor_row).and_then(|row| row.first_mut()) {
        *first = date.to_string();
    }

    let width = MIN_REPORT_COLUMNS.max(columns.required_width());
    let fill_start = anchor_row + fill_offset;
    for hour in 0..HOUR_SLOTS {
        let Some(row) = rows.get_mut(fill_start + hour as usize) else {
            break;
        };
        while row.len() < width {
            row.push(String::new());
        }
        if let Some(record) = records.get(&hour) {
            row[columns.flow] = record.flow.clone();
            row[columns.temperature] = record.temperature.clone();
            row[columns.humidity] = record.humidity.clone();
            row[columns.o2] = record.o2.clone();
            row[columns.velocity] = record.velocity.clone();
            row[columns.nmhc] = record.nmhc.clone();
            row[columns.nox] = record.nox.clone();
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::HourlyRecord;

    fn record(tag: &str) -> HourlyRecord {
        HourlyRecord {
            flow: format!("{tag}-flow"),
            nox: format!("{tag}-nox"),
            nmhc: format!("{tag}-nmhc"),
            o2: format!("{tag}-o2"),
            velocity: format!("{tag}-velo"),
            temperature: format!("{tag}-temp"),
            humidity: format!("{tag}-humi"),
        }
    }

    /// Template with the anchor at row 1 and ten-wide hour rows carrying a
    /// sentinel in column 6.
    fn template(hour_rows: usize) -> Vec<Vec<String>> {
        let mut rows = vec![
            vec!["排放口".to_string(), "ABS装置".to_string()],
            vec!["日期".to_string()],
            vec!["表头一".to_string()],
            vec!["表头二".to_string()],
        ];
        for hour in 0..hour_rows {
            let mut row = vec![String::new(); 10];
            row[0] = format!("{hour}时");
            row[6] = "保留".to_string();
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_single_hour_fills_only_its_slot() {
        let template_rows = template(24);
        let mut records = DayRecords::new();
        records.insert(5, record("h5"));

        let rows = project_day(
            &template_rows,
            1,
            "2025-08-01",
            &records,
            &TargetColumns::default(),
            3,
        );

        // Anchor row takes the date, first cell only.
        assert_eq!(rows[1][0], "2025-08-01");

        let filled = &rows[4 + 5];
        assert_eq!(filled[1], "h5-flow");
        assert_eq!(filled[2], "h5-temp");
        assert_eq!(filled[3], "h5-humi");
        assert_eq!(filled[4], "h5-o2");
        assert_eq!(filled[5], "h5-velo");
        assert_eq!(filled[6], "保留");
        assert_eq!(filled[7], "h5-nmhc");
        assert_eq!(filled[8], "h5-nox");

        // Every other row is exactly the template copy.
        for (index, row) in rows.iter().enumerate() {
            if index == 1 || index == 9 {
                continue;
            }
            assert_eq!(row, &template_rows[index], "row {index} changed");
        }
    }

    #[test]
    fn test_short_template_truncates_silently() {
        // Only 2 hour rows available; hours 2..23 have nowhere to go.
        let template_rows = template(2);
        let mut records = DayRecords::new();
        records.insert(0, record("h0"));
        records.insert(10, record("h10"));

        let rows = project_day(
            &template_rows,
            1,
            "2025-08-02",
            &records,
            &TargetColumns::default(),
            3,
        );

        assert_eq!(rows.len(), template_rows.len());
        assert_eq!(rows[4][1], "h0-flow");
    }

    #[test]
    fn test_narrow_hour_rows_are_padded() {
        let mut template_rows = template(24);
        template_rows[4] = vec!["0时".to_string()];

        let rows = project_day(
            &template_rows,
            1,
            "2025-08-03",
            &DayRecords::new(),
            &TargetColumns::default(),
            3,
        );

        // Padded to the minimum width even with no data for the hour.
        assert_eq!(rows[4].len(), 10);
        assert_eq!(rows[4][0], "0时");
        assert!(rows[4][1..].iter().all(String::is_empty));
    }

    #[test]
    fn test_empty_anchor_row_keeps_template_shape() {
        let mut template_rows = template(24);
        template_rows[1] = Vec::new();

        let rows = project_day(
            &template_rows,
            1,
            "2025-08-04",
            &DayRecords::new(),
            &TargetColumns::default(),
            3,
        );
        assert!(rows[1].is_empty());
    }

    #[test]
    fn test_wide_target_offsets_extend_rows() {
        let columns = TargetColumns {
            nox: 12,
            ..TargetColumns::default()
        };
        let template_rows = template(24);
        let mut records = DayRecords::new();
        records.insert(0, record("h0"));

        let rows = project_day(&template_rows, 1, "2025-08-05", &records, &columns, 3);
        assert_eq!(rows[4].len(), 13);
        assert_eq!(rows[4][12], "h0-nox");
    }
}
