//! CLI settings file.
//!
//! A settings file is an analysis configuration with an optional `[columns]`
//! table naming the CSV headers to read.

use std::path::Path;

use crime_stats_analytics::config::{AnalysisConfig, DEFAULT_CONFIG_TOML};
use crime_stats_loader::ColumnMapping;
use serde::Deserialize;

/// Everything the CLI reads from a settings file.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Question parameters.
    #[serde(flatten)]
    pub analysis: AnalysisConfig,
    /// CSV header names.
    #[serde(default)]
    pub columns: ColumnMapping,
}

/// Parses settings from a TOML string and validates the analysis part.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or the analysis parameters are
/// invalid.
pub fn parse_settings(toml_str: &str) -> Result<Settings, Box<dyn std::error::Error>> {
    let settings: Settings = toml::from_str(toml_str)?;
    settings.analysis.validate()?;
    Ok(settings)
}

/// Loads settings from `path`, or the embedded defaults when no path is
/// given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::info!("Reading settings from {}", path.display());
            parse_settings(&std::fs::read_to_string(path)?)
        }
        None => parse_settings(DEFAULT_CONFIG_TOML),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.analysis, AnalysisConfig::default());
        assert_eq!(settings.columns, ColumnMapping::default());
    }

    #[test]
    fn reads_columns_alongside_analysis() {
        let settings = parse_settings(
            r#"
top_n = 5

[season_ranking]
year = 2021

[columns]
report_date = "reported"
report_no = "id"
"#,
        )
        .unwrap();
        assert_eq!(settings.analysis.top_n, 5);
        assert_eq!(settings.analysis.season_ranking.year, 2021);
        assert_eq!(settings.columns.report_date, "reported");
        assert_eq!(settings.columns.report_no, "id");
        assert_eq!(settings.columns.victim_age, "Vict Age");
    }

    #[test]
    fn invalid_analysis_is_rejected() {
        assert!(parse_settings("top_n = 0").is_err());
    }
}
