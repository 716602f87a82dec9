//! Add 1/2/3-year price forecasts to a real estate CSV
//!
//! Picks locality CAGR where present, city CAGR otherwise, and writes the
//! enriched table alongside the original columns.

use anyhow::{Context, Result};
use clap::Parser;
use price_forecaster::{forecast, ForecastConfig};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "forecast_prices")]
#[command(about = "Forecast price per unit area from locality/city CAGR", long_about = None)]
struct Cli {
    /// Input CSV (defaults to clean_real_estate_with_cagr.csv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output CSV, overwritten if present (defaults to clean_real_estate_forecast.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with column names, forecast years and rounding
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Defaults, then the config file, then command line flags
    fn resolve_config(&self) -> Result<ForecastConfig> {
        let mut config = match &self.config {
            Some(path) => ForecastConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ForecastConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let start = Instant::now();
    let summary = forecast::run(&config).with_context(|| {
        format!(
            "forecasting {} -> {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Output written to {}", config.output_path.display());
    println!("\nForecast Summary:");
    println!("  Rows:           {}", summary.rows);
    println!("  Locality CAGR:  {}", summary.locality);
    println!("  City CAGR:      {}", summary.city);
    println!("  No CAGR:        {}", summary.none);
    println!("  Unforecastable: {}", summary.unforecastable);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("forecast.json");
        std::fs::write(
            &config_path,
            r#"{"input_path": "from_file.csv", "output_path": "file_out.csv", "decimal_places": 1}"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "forecast_prices",
            "--config",
            config_path.to_str().unwrap(),
            "--output",
            "cli_out.csv",
        ]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.input_path, PathBuf::from("from_file.csv"));
        assert_eq!(config.output_path, PathBuf::from("cli_out.csv"));
        assert_eq!(config.decimal_places, 1);
    }

    #[test]
    fn test_no_flags_uses_defaults() {
        let cli = Cli::parse_from(["forecast_prices"]);
        assert_eq!(cli.resolve_config().unwrap(), ForecastConfig::default());
    }
}
