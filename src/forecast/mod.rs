//! Growth rate selection and compound price forecasts

mod growth;
mod engine;

pub use growth::{choose_growth_rate, forecast_price, round_to, GrowthRateChoice, GrowthRateSource};
pub use engine::{run, Forecaster, ForecastSummary, RowForecast};
