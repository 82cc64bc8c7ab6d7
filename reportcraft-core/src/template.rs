//! Template anchor location

use crate::error::PipelineError;
use crate::reader::{Sheet, Workbook};

/// Characters ignored when matching the marker against row text: space,
/// full-width space, and tab.
const IGNORED: [char; 3] = [' ', '\u{3000}', '\t'];

/// The template row a report is positioned around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateAnchor<'a> {
    pub sheet: &'a Sheet,
    pub row: usize,
}

/// Find the first row, across sheets in decode order, whose concatenated
/// cell text contains the marker once spacing is ignored on both sides.
/// The scan stops at the first hit; later matches are never considered.
pub fn locate_anchor<'a>(
    workbook: &'a Workbook,
    marker: &str,
) -> Result<TemplateAnchor<'a>, PipelineError> {
    let target = normalize_marker(marker);
    for sheet in &workbook.sheets {
        for (index, row) in sheet.rows.iter().enumerate() {
            if normalize_row(row).contains(&target) {
                return Ok(TemplateAnchor { sheet, row: index });
            }
        }
    }
    Err(PipelineError::TemplateMismatch { marker: target })
}

fn normalize_marker(marker: &str) -> String {
    marker.replace(' ', "").trim().to_string()
}

/// Cells joined and stripped of spacing so neither cell boundaries nor
/// label padding can break a match.
fn normalize_row(row: &[String]) -> String {
    let mut text = row.concat();
    text.retain(|ch| !IGNORED.contains(&ch));
    text
}
