//! Forecast run configuration
//!
//! Column names, horizons and paths. Defaults match the cleaned real estate
//! dataset; any field can be overridden from a JSON file:
//! - Input column names (price, city CAGR, locality CAGR)
//! - Derived column names
//! - Forecast years and rounding precision

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default input file, produced by the CAGR cleaning step
pub const DEFAULT_INPUT_PATH: &str = "clean_real_estate_with_cagr.csv";

/// Default output file
pub const DEFAULT_OUTPUT_PATH: &str = "clean_real_estate_forecast.csv";

/// Parameters for a forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Overwritten if it already exists
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Price per unit area, the forecast base value
    #[serde(default = "default_price_column")]
    pub price_column: String,

    /// City level annual CAGR (fallback rate)
    #[serde(default = "default_city_growth_column")]
    pub city_growth_column: String,

    /// Locality level annual CAGR (preferred rate)
    #[serde(default = "default_locality_growth_column")]
    pub locality_growth_column: String,

    #[serde(default = "default_chosen_growth_column")]
    pub chosen_growth_column: String,

    #[serde(default = "default_growth_source_column")]
    pub growth_source_column: String,

    /// Forecast columns are named `{prefix}{year}`
    #[serde(default = "default_forecast_column_prefix")]
    pub forecast_column_prefix: String,

    /// Years ahead to forecast
    /// Default: [1, 2, 3]
    #[serde(default = "default_forecast_years")]
    pub forecast_years: Vec<u32>,

    /// Decimal places forecasts are rounded to
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_input_path() -> PathBuf { PathBuf::from(DEFAULT_INPUT_PATH) }
fn default_output_path() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT_PATH) }
fn default_price_column() -> String { "Price_per_SQFT".to_string() }
fn default_city_growth_column() -> String { "City_Level_Annual_CAGR".to_string() }
fn default_locality_growth_column() -> String { "Locality_Level_Annual_CAGR".to_string() }
fn default_chosen_growth_column() -> String { "chosen_growth_rate".to_string() }
fn default_growth_source_column() -> String { "growth_rate_source".to_string() }
fn default_forecast_column_prefix() -> String { "forecast_year_".to_string() }
fn default_forecast_years() -> Vec<u32> { vec![1, 2, 3] }
fn default_decimal_places() -> u32 { 2 }

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            price_column: default_price_column(),
            city_growth_column: default_city_growth_column(),
            locality_growth_column: default_locality_growth_column(),
            chosen_growth_column: default_chosen_growth_column(),
            growth_source_column: default_growth_source_column(),
            forecast_column_prefix: default_forecast_column_prefix(),
            forecast_years: default_forecast_years(),
            decimal_places: default_decimal_places(),
        }
    }
}

impl ForecastConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ForecastError::io(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ForecastError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that cannot produce a forecast table
    pub fn validate(&self) -> Result<()> {
        if self.forecast_years.is_empty() {
            return Err(ForecastError::Config("forecast_years must not be empty".to_string()));
        }
        let required = [
            ("price_column", &self.price_column),
            ("city_growth_column", &self.city_growth_column),
            ("locality_growth_column", &self.locality_growth_column),
            ("chosen_growth_column", &self.chosen_growth_column),
            ("growth_source_column", &self.growth_source_column),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ForecastError::Config(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }

    /// Name of the forecast column for a given year
    pub fn forecast_column(&self, year: u32) -> String {
        format!("{}{}", self.forecast_column_prefix, year)
    }

    /// All derived column names, in output order
    pub fn derived_columns(&self) -> Vec<String> {
        let mut columns = vec![
            self.chosen_growth_column.clone(),
            self.growth_source_column.clone(),
        ];
        columns.extend(self.forecast_years.iter().map(|&y| self.forecast_column(y)));
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::default();
        assert_eq!(config.price_column, "Price_per_SQFT");
        assert_eq!(config.forecast_years, vec![1, 2, 3]);
        assert_eq!(config.decimal_places, 2);
        assert_eq!(
            config.derived_columns(),
            vec![
                "chosen_growth_rate",
                "growth_rate_source",
                "forecast_year_1",
                "forecast_year_2",
                "forecast_year_3",
            ]
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ForecastConfig::from_json_str(
            r#"{"price_column": "price_per_unit_area", "decimal_places": 3}"#,
        )
        .expect("valid config");

        assert_eq!(config.price_column, "price_per_unit_area");
        assert_eq!(config.decimal_places, 3);
        assert_eq!(config.city_growth_column, "City_Level_Annual_CAGR");
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_empty_years_rejected() {
        let result = ForecastConfig::from_json_str(r#"{"forecast_years": []}"#);
        assert!(matches!(result, Err(ForecastError::Config(_))));
    }

    #[test]
    fn test_bad_json_rejected() {
        let result = ForecastConfig::from_json_str("{not json");
        assert!(matches!(result, Err(ForecastError::Config(_))));
    }
}
