use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use reportcraft_core::{InputFile, ReportArchive, ReportConfig, ReportGenerator, package};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is
/// not given.
const DEFAULT_CONFIG_PATH: &str = "reportgen.toml";

#[derive(Parser)]
#[command(name = "reportgen")]
#[command(about = "Builds per-day emission report archives from hourly monitoring exports", long_about = None)]
#[command(version)]
struct Cli {
    /// Hourly monitoring data export (xlsx/xls/ods or delimited text)
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Daily report template (xlsx/xls/ods or delimited text)
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Output archive path
    #[arg(short, long, value_name = "FILE", default_value = "daily_reports.zip")]
    output: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Marker text locating the anchor row, overriding the configuration
    #[arg(short, long, value_name = "TEXT")]
    marker: Option<String>,

    /// Suppress the run summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(marker) = cli.marker {
        config.marker = marker;
    }

    let source_bytes = fs::read(&cli.source)
        .with_context(|| format!("Failed to read source file: {}", cli.source.display()))?;
    let template_bytes = fs::read(&cli.template)
        .with_context(|| format!("Failed to read template file: {}", cli.template.display()))?;

    let generator = ReportGenerator::with_config(config);
    let archive = generator
        .generate(
            InputFile::new(&file_name(&cli.source), &source_bytes),
            InputFile::new(&file_name(&cli.template), &template_bytes),
        )
        .context("Report generation failed")?;

    fs::write(&cli.output, &archive.bytes)
        .with_context(|| format!("Failed to write archive: {}", cli.output.display()))?;

    if !cli.quiet {
        print_summary(&archive, &cli.output);
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    if let Some(config_path) = path {
        ReportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        // Try to load default config from current directory if it exists
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            ReportConfig::from_file(&default_path)
                .with_context(|| format!("Failed to load config from {}", default_path.display()))
        } else {
            Ok(ReportConfig::default())
        }
    }
}

/// Filename part of a path, used for format classification by the reader.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_summary(archive: &ReportArchive, output: &Path) {
    println!("{}", "Daily report generation".bold());
    println!(
        "  Parsed {} hourly row(s) across {} day(s)",
        archive.valid_rows.to_string().cyan(),
        archive.days.len().to_string().cyan()
    );
    println!(
        "  Template anchor: sheet {}, row index {}",
        archive.template_sheet.cyan(),
        archive.anchor_row.to_string().cyan()
    );

    if archive.days.is_empty() {
        println!(
            "{}",
            "  No valid data rows found; archive has no entries".yellow()
        );
    } else {
        println!("\n{}", "Archive entries:".bold());
        for date in &archive.days {
            println!("  {} {}", "+".green(), package::entry_name(date));
        }
    }

    println!(
        "\n{} {}",
        "✓ Archive written to".green().bold(),
        output.display()
    );
}
