//! Daily emission report generation from hourly monitoring exports.
//!
//! The pipeline ingests two uploaded files, a raw hourly data source and a
//! report template, extracts per-day/per-hour measurements from the source,
//! anchors the template on a configured monitoring-point marker, projects
//! each day's records onto a copy of the template, and packs one CSV per
//! day into a single zip archive.
//!
//! Everything is synchronous and request-scoped: bytes in, bytes out, no
//! state kept between runs.

pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod package;
pub mod project;
pub mod reader;
pub mod template;

pub use config::{DEFAULT_MARKER, ReportConfig, SourceColumns, TargetColumns};
pub use error::PipelineError;
pub use extract::{DailyDataMap, DayRecords, HourlyRecord};
pub use format::format_measurement;
pub use reader::{Sheet, Workbook, read_tabular};
pub use template::TemplateAnchor;

/// An uploaded file: raw bytes plus the filename used for format
/// detection.
#[derive(Debug, Clone, Copy)]
pub struct InputFile<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> InputFile<'a> {
    pub fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }
}

/// A finished run: the archive bytes plus the summary callers report.
#[derive(Debug, Clone)]
pub struct ReportArchive {
    /// Complete zip archive, one CSV entry per day.
    pub bytes: Vec<u8>,
    /// Date keys in order of first appearance in the source.
    pub days: Vec<String>,
    /// Source rows that parsed into an hourly record.
    pub valid_rows: usize,
    /// Template sheet the anchor was found on.
    pub template_sheet: String,
    /// Zero-based anchor row index within that sheet.
    pub anchor_row: usize,
}

/// Pipeline entry point. One instance carries one layout configuration;
/// every call is independent.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Generator with the stock layout.
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
        }
    }

    /// Generator with custom configuration.
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run the whole pipeline: decode both inputs, extract the day map,
    /// anchor the template, project every day, and pack the archive.
    ///
    /// A source that locates correctly but yields no valid rows still
    /// succeeds, producing an archive with no entries.
    pub fn generate(
        &self,
        source: InputFile<'_>,
        template: InputFile<'_>,
    ) -> Result<ReportArchive, PipelineError> {
        let source_book = reader::read_tabular(source.name, source.bytes)?;
        let template_book = reader::read_tabular(template.name, template.bytes)?;

        let data_sheet = extract::locate_data_sheet(&source_book)?;
        let data_start = extract::find_data_start(data_sheet)?;
        let data = extract::extract_hourly_records(
            &data_sheet.rows[data_start..],
            &self.config.source_columns,
        );

        let anchor = template::locate_anchor(&template_book, &self.config.marker)?;

        let mut reports = Vec::with_capacity(data.day_count());
        for (date, records) in data.days() {
            let rows = project::project_day(
                &anchor.sheet.rows,
                anchor.row,
                date,
                records,
                &self.config.target_columns,
                self.config.fill_offset,
            );
            reports.push((date.to_string(), rows));
        }
        let bytes = package::package_reports(&reports)?;

        Ok(ReportArchive {
            bytes,
            days: reports.into_iter().map(|(date, _)| date).collect(),
            valid_rows: data.valid_rows(),
            template_sheet: anchor.sheet.name.clone(),
            anchor_row: anchor.row,
        })
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
