//! In-memory workbook model shared by every pipeline stage

/// A single decoded sheet: a name plus rows of string cells.
///
/// Rows are jagged. Blank spreadsheet cells decode to empty strings so
/// positional indexing behaves the same across input formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at (row, col), or empty when outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Decoded sheets in decode order.
///
/// Order is load-bearing: the locators scan sheets in this order and stop
/// at the first match.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

impl From<Vec<Sheet>> for Workbook {
    fn from(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }
}
