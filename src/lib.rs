//! Price Forecaster - forward price projections for real estate datasets
//!
//! This library provides:
//! - CSV table loading and writing that keeps original cells untouched
//! - Growth rate selection (locality CAGR first, city CAGR as fallback)
//! - 1/2/3-year compound price forecasts per unit area
//! - Configurable column names, horizons and rounding

pub mod config;
pub mod error;
pub mod forecast;
pub mod table;

// Re-export commonly used types
pub use config::ForecastConfig;
pub use error::{ForecastError, Result};
pub use forecast::{run, Forecaster, ForecastSummary, GrowthRateChoice, GrowthRateSource};
pub use table::Table;
