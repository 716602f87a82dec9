//! Forecaster over a whole table and the read/forecast/write pipeline

use super::growth::{choose_growth_rate, forecast_price, GrowthRateChoice, GrowthRateSource};
use crate::config::ForecastConfig;
use crate::error::Result;
use crate::table::{self, format_number, Table};
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Instant;

/// Growth rate choice and forecasts for a single row
#[derive(Debug, Clone, PartialEq)]
pub struct RowForecast {
    pub choice: GrowthRateChoice,
    /// One entry per configured forecast year, in order
    pub forecasts: Vec<Option<f64>>,
}

impl RowForecast {
    pub fn is_forecastable(&self) -> bool {
        self.forecasts.iter().all(Option::is_some)
    }
}

/// Counts from a forecast run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForecastSummary {
    pub rows: usize,
    pub locality: usize,
    pub city: usize,
    pub none: usize,
    /// Rows with no forecast (missing price or no growth rate)
    pub unforecastable: usize,
}

impl ForecastSummary {
    fn record(&mut self, row: &RowForecast) {
        self.rows += 1;
        match row.choice.source {
            GrowthRateSource::Locality => self.locality += 1,
            GrowthRateSource::City => self.city += 1,
            GrowthRateSource::None => self.none += 1,
        }
        if !row.is_forecastable() {
            self.unforecastable += 1;
        }
    }
}

/// Column indices of the three required inputs
#[derive(Debug, Clone, Copy)]
struct InputColumns {
    price: usize,
    city: usize,
    locality: usize,
}

/// Adds chosen growth rate, its source, and N-year forecasts to a table
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Forecast a single row from its parsed inputs
    pub fn forecast_row(&self, price: Option<f64>, locality: Option<f64>, city: Option<f64>) -> RowForecast {
        let choice = choose_growth_rate(locality, city);
        let forecasts = self
            .config
            .forecast_years
            .iter()
            .map(|&years| forecast_price(price, choice.rate, years, self.config.decimal_places))
            .collect();
        RowForecast { choice, forecasts }
    }

    fn input_columns(&self, table: &Table) -> Result<InputColumns> {
        let columns = InputColumns {
            price: table.require_column(&self.config.price_column)?,
            city: table.require_column(&self.config.city_growth_column)?,
            locality: table.require_column(&self.config.locality_growth_column)?,
        };
        debug!(
            "Input columns: price={} city={} locality={}",
            columns.price, columns.city, columns.locality
        );
        Ok(columns)
    }

    /// Forecast every row without touching the table
    ///
    /// Fails on the first missing column or unparseable number.
    pub fn forecast_table(&self, table: &Table) -> Result<Vec<RowForecast>> {
        let cols = self.input_columns(table)?;
        (0..table.len())
            .map(|row| -> Result<RowForecast> {
                let price = table.numeric_cell(row, cols.price)?;
                let locality = table.numeric_cell(row, cols.locality)?;
                let city = table.numeric_cell(row, cols.city)?;
                Ok(self.forecast_row(price, locality, city))
            })
            .collect()
    }

    /// Add the derived columns to `table`
    ///
    /// Derived columns that already exist are overwritten in place, so running
    /// on a previous output gives the same result. The table is left untouched
    /// if any row fails.
    pub fn apply(&self, table: &mut Table) -> Result<ForecastSummary> {
        let forecasts = self.forecast_table(table)?;

        let mut summary = ForecastSummary::default();
        for row in &forecasts {
            summary.record(row);
        }

        let chosen = forecasts.iter().map(|r| format_number(r.choice.rate)).collect();
        table.set_column(&self.config.chosen_growth_column, chosen);

        let sources = forecasts.iter().map(|r| r.choice.source.to_string()).collect();
        table.set_column(&self.config.growth_source_column, sources);

        for (i, &years) in self.config.forecast_years.iter().enumerate() {
            let values = forecasts.iter().map(|r| format_number(r.forecasts[i])).collect();
            table.set_column(&self.config.forecast_column(years), values);
        }

        if summary.unforecastable > 0 {
            warn!(
                "{} of {} rows have no forecast (missing price or growth rate)",
                summary.unforecastable, summary.rows
            );
        }

        Ok(summary)
    }
}

/// Read the input, add forecasts, write the output
///
/// Nothing is written unless the whole input loads and forecasts cleanly.
pub fn run(config: &ForecastConfig) -> Result<ForecastSummary> {
    config.validate()?;
    let start = Instant::now();

    info!("Loading {}", config.input_path.display());
    let mut table = table::read_table(&config.input_path)?;
    info!("Loaded {} rows, {} columns in {:?}", table.len(), table.headers.len(), start.elapsed());

    let forecaster = Forecaster::new(config.clone());
    let summary = forecaster.apply(&mut table)?;
    info!(
        "Forecast sources: locality={} city={} none={}",
        summary.locality, summary.city, summary.none
    );

    table::write_table(&table, &config.output_path)?;
    info!("Wrote {} in {:?}", config.output_path.display(), start.elapsed());

    Ok(summary)
}
