use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use reportcraft_core::{ReportConfig, Workbook, extract, reader, template};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "reportgen.toml";

/// Hour slots a template must fit below the fill-start row.
const HOUR_SLOTS: usize = 24;

#[derive(Parser)]
#[command(name = "reportstats")]
#[command(about = "Reports how a source or template file is parsed and anchored")]
#[command(version)]
struct Cli {
    /// File to inspect (xlsx/xls/ods or delimited text)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Inspect the file as a data source or a report template
    #[arg(short, long, value_enum, default_value = "source")]
    role: Role,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Marker text locating the anchor row, overriding the configuration
    #[arg(short, long, value_name = "TEXT")]
    marker: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum Role {
    /// Hourly monitoring data export
    Source,
    /// Daily report template
    Template,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Serialize)]
struct FileStats {
    file: String,
    sheets: Vec<SheetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SourceStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<TemplateStats>,
}

#[derive(Serialize)]
struct SheetInfo {
    name: String,
    rows: usize,
}

#[derive(Serialize)]
struct SourceStats {
    data_sheet: String,
    data_start: usize,
    valid_rows: usize,
    days: Vec<DayCount>,
}

#[derive(Serialize)]
struct DayCount {
    date: String,
    hours: usize,
}

#[derive(Serialize)]
struct TemplateStats {
    marker: String,
    sheet: String,
    anchor_row: usize,
    fill_start: usize,
    hour_rows_available: usize,
    fits_all_hours: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(marker) = cli.marker {
        config.marker = marker;
    }

    let bytes = fs::read(&cli.file)
        .with_context(|| format!("Failed to read file: {}", cli.file.display()))?;
    let name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let workbook = reader::read_tabular(&name, &bytes)
        .with_context(|| format!("Failed to decode file: {}", cli.file.display()))?;

    let sheets = workbook
        .sheets
        .iter()
        .map(|sheet| SheetInfo {
            name: sheet.name.clone(),
            rows: sheet.rows.len(),
        })
        .collect();

    let mut stats = FileStats {
        file: cli.file.display().to_string(),
        sheets,
        source: None,
        template: None,
    };
    match cli.role {
        Role::Source => {
            stats.source = Some(calculate_source_stats(&workbook, &config)?);
        }
        Role::Template => {
            stats.template = Some(calculate_template_stats(&workbook, &config)?);
        }
    }

    match cli.format {
        OutputFormat::Human => print_human(&stats),
        OutputFormat::Json => print_json(&stats)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    if let Some(config_path) = path {
        ReportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            ReportConfig::from_file(&default_path)
                .with_context(|| format!("Failed to load config from {}", default_path.display()))
        } else {
            Ok(ReportConfig::default())
        }
    }
}

fn calculate_source_stats(workbook: &Workbook, config: &ReportConfig) -> Result<SourceStats> {
    let sheet = extract::locate_data_sheet(workbook).context("No data sheet found")?;
    let data_start = extract::find_data_start(sheet).context("No data-start row found")?;
    let data = extract::extract_hourly_records(&sheet.rows[data_start..], &config.source_columns);

    let days = data
        .days()
        .map(|(date, records)| DayCount {
            date: date.to_string(),
            hours: records.len(),
        })
        .collect();

    Ok(SourceStats {
        data_sheet: sheet.name.clone(),
        data_start,
        valid_rows: data.valid_rows(),
        days,
    })
}

fn calculate_template_stats(workbook: &Workbook, config: &ReportConfig) -> Result<TemplateStats> {
    let anchor = template::locate_anchor(workbook, &config.marker)
        .context("Marker not found in template")?;

    let fill_start = anchor.row + config.fill_offset;
    let hour_rows_available = anchor
        .sheet
        .rows
        .len()
        .saturating_sub(fill_start)
        .min(HOUR_SLOTS);

    Ok(TemplateStats {
        marker: config.marker.clone(),
        sheet: anchor.sheet.name.clone(),
        anchor_row: anchor.row,
        fill_start,
        hour_rows_available,
        fits_all_hours: hour_rows_available == HOUR_SLOTS,
    })
}

fn print_human(stats: &FileStats) {
    println!("File: {}", stats.file);
    println!("  Total Sheets: {}", stats.sheets.len());
    for sheet in &stats.sheets {
        println!("  {}: {} row(s)", sheet.name, sheet.rows);
    }

    if let Some(source) = &stats.source {
        println!("\nSource layout:");
        println!("  Data Sheet: {}", source.data_sheet);
        println!("  Data Start Row: {}", source.data_start);
        println!("  Valid Rows: {}", source.valid_rows);
        println!("  Days: {}", source.days.len());
        for day in &source.days {
            println!("    {}: {} hour(s)", day.date, day.hours);
        }
    }

    if let Some(template) = &stats.template {
        println!("\nTemplate layout:");
        println!("  Marker: {}", template.marker);
        println!("  Matched Sheet: {}", template.sheet);
        println!("  Anchor Row: {}", template.anchor_row);
        println!("  Fill Start Row: {}", template.fill_start);
        println!(
            "  Hour Rows Available: {} of {}",
            template.hour_rows_available, HOUR_SLOTS
        );
        if !template.fits_all_hours {
            println!("  Note: template is too short; trailing hours will be dropped");
        }
    }
}

fn print_json(stats: &FileStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    println!("{}", json);
    Ok(())
}
