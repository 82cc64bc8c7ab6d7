//! Measurement value normalization

/// Normalize one raw cell value for the report.
///
/// Trims whitespace, renders anything numeric with exactly three decimal
/// places, and passes other text through trimmed but otherwise untouched.
/// Empty input stays empty. Never fails.
pub fn format_measurement(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match trimmed.parse::<f64>() {
        Ok(value) => format!("{value:.3}"),
        Err(_) => trimmed.to_string(),
    }
}
