//! Analysis parameters.
//!
//! Parameters are read from TOML. A default document is embedded at compile
//! time and mirrors [`AnalysisConfig::default`].

use crime_stats_analytics_models::MissingCategoryPolicy;
use serde::{Deserialize, Serialize};

use crate::AnalyticsError;
use crate::rank::DEFAULT_TOP_N;

/// The embedded default configuration document.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Parameters for all six analytical questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows kept per partition by the top-N questions.
    pub top_n: u32,
    /// Years compared by the increase questions.
    pub comparison: ComparisonConfig,
    /// Year ranked by season.
    pub season_ranking: YearConfig,
    /// Year ranked by victim age bracket.
    pub age_ranking: YearConfig,
    /// Years ranked individually.
    pub year_ranking: YearRangeConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            comparison: ComparisonConfig::default(),
            season_ranking: YearConfig::default(),
            age_ranking: YearConfig::default(),
            year_ranking: YearRangeConfig::default(),
        }
    }
}

/// Two years to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Earlier year.
    pub base_year: i32,
    /// Later year.
    pub target_year: i32,
    /// Handling of crimes reported in only one of the years.
    pub missing_category: MissingCategoryPolicy,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            base_year: 2020,
            target_year: 2021,
            missing_category: MissingCategoryPolicy::TreatAsZero,
        }
    }
}

/// A single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearConfig {
    /// Report year.
    pub year: i32,
}

impl Default for YearConfig {
    fn default() -> Self {
        Self { year: 2022 }
    }
}

/// An inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearRangeConfig {
    /// First year, inclusive.
    pub from_year: i32,
    /// Last year, inclusive.
    pub to_year: i32,
}

impl Default for YearRangeConfig {
    fn default() -> Self {
        Self {
            from_year: 2022,
            to_year: 2023,
        }
    }
}

impl AnalysisConfig {
    /// Checks that the parameters describe answerable questions.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidConfig`] if `top_n` is zero, the
    /// compared years are equal, or the year range is inverted.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.top_n == 0 {
            return Err(AnalyticsError::InvalidConfig {
                message: "top_n must be at least 1".to_string(),
            });
        }
        if self.comparison.base_year == self.comparison.target_year {
            return Err(AnalyticsError::InvalidConfig {
                message: format!(
                    "comparison years must differ (both are {})",
                    self.comparison.base_year
                ),
            });
        }
        if self.year_ranking.from_year > self.year_ranking.to_year {
            return Err(AnalyticsError::InvalidConfig {
                message: format!(
                    "year_ranking.from_year ({}) is after to_year ({})",
                    self.year_ranking.from_year, self.year_ranking.to_year
                ),
            });
        }
        Ok(())
    }
}

/// Parses and validates an analysis configuration from a TOML string.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the TOML is malformed or fails
/// [`AnalysisConfig::validate`].
pub fn parse_config_toml(toml_str: &str) -> Result<AnalysisConfig, AnalyticsError> {
    let config: AnalysisConfig = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_matches_default_impl() {
        let parsed = parse_config_toml(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, AnalysisConfig::default());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed = parse_config_toml("top_n = 5\n[comparison]\ntarget_year = 2023\n").unwrap();
        assert_eq!(parsed.top_n, 5);
        assert_eq!(parsed.comparison.base_year, 2020);
        assert_eq!(parsed.comparison.target_year, 2023);
        assert_eq!(parsed.season_ranking.year, 2022);
    }

    #[test]
    fn parses_exclude_policy() {
        let parsed =
            parse_config_toml("[comparison]\nmissing_category = \"exclude\"\n").unwrap();
        assert_eq!(
            parsed.comparison.missing_category,
            MissingCategoryPolicy::Exclude
        );
    }

    #[test]
    fn rejects_zero_top_n() {
        assert!(matches!(
            parse_config_toml("top_n = 0"),
            Err(AnalyticsError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_equal_comparison_years() {
        let toml = "[comparison]\nbase_year = 2021\ntarget_year = 2021\n";
        assert!(matches!(
            parse_config_toml(toml),
            Err(AnalyticsError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_inverted_year_range() {
        let toml = "[year_ranking]\nfrom_year = 2023\nto_year = 2022\n";
        assert!(parse_config_toml(toml).is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            parse_config_toml("top_n = \"three\""),
            Err(AnalyticsError::Toml(_))
        ));
    }
}
