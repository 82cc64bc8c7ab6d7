//! Report layout configuration
//!
//! The column offsets are layout contracts tied to the upstream export and
//! the template workbook. They live here rather than in the extraction and
//! projection code so a layout change never touches pipeline logic.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Monitoring point named in the template; the row containing this text
/// anchors the whole report layout.
pub const DEFAULT_MARKER: &str = "ABS装置焚烧炉废气排放口";

const DEFAULT_FILL_OFFSET: usize = 3;

/// Layout configuration for one generator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Marker text locating the anchor row in the template.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Rows between the anchor row and the hour-0 slot.
    #[serde(default = "default_fill_offset")]
    pub fill_offset: usize,
    /// Where each measurement sits in a source data row.
    #[serde(default)]
    pub source_columns: SourceColumns,
    /// Where each measurement lands in a report row.
    #[serde(default)]
    pub target_columns: TargetColumns,
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            fill_offset: DEFAULT_FILL_OFFSET,
            source_columns: SourceColumns::default(),
            target_columns: TargetColumns::default(),
        }
    }
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_fill_offset() -> usize {
    DEFAULT_FILL_OFFSET
}

/// Column offsets of the measurements within a source data row. Column 0
/// is always the timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceColumns {
    pub flow: usize,
    pub nox: usize,
    pub nmhc: usize,
    pub o2: usize,
    pub velocity: usize,
    pub temperature: usize,
    pub humidity: usize,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            flow: 1,
            nox: 6,
            nmhc: 11,
            o2: 14,
            velocity: 17,
            temperature: 20,
            humidity: 23,
        }
    }
}

/// Column offsets the measurements are written to in each hour row of the
/// report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetColumns {
    pub flow: usize,
    pub temperature: usize,
    pub humidity: usize,
    pub o2: usize,
    pub velocity: usize,
    pub nmhc: usize,
    pub nox: usize,
}

impl TargetColumns {
    /// Narrowest row that can hold every configured offset.
    pub fn required_width(&self) -> usize {
        let widest = [
            self.flow,
            self.temperature,
            self.humidity,
            self.o2,
            self.velocity,
            self.nmhc,
            self.nox,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        widest + 1
    }
}

impl Default for TargetColumns {
    fn default() -> Self {
        Self {
            flow: 1,
            temperature: 2,
            humidity: 3,
            o2: 4,
            velocity: 5,
            nmhc: 7,
            nox: 8,
        }
    }
}
