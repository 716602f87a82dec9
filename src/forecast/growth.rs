//! Per-row growth rate choice and forecast arithmetic

use std::fmt;

/// Which CAGR column a row's chosen growth rate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthRateSource {
    Locality,
    City,
    None,
}

impl GrowthRateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthRateSource::Locality => "locality",
            GrowthRateSource::City => "city",
            GrowthRateSource::None => "none",
        }
    }
}

impl fmt::Display for GrowthRateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chosen growth rate for a row and where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRateChoice {
    pub rate: Option<f64>,
    pub source: GrowthRateSource,
}

/// Locality CAGR if present, else city CAGR, else nothing
pub fn choose_growth_rate(locality: Option<f64>, city: Option<f64>) -> GrowthRateChoice {
    match (locality, city) {
        (Some(rate), _) => GrowthRateChoice { rate: Some(rate), source: GrowthRateSource::Locality },
        (None, Some(rate)) => GrowthRateChoice { rate: Some(rate), source: GrowthRateSource::City },
        (None, None) => GrowthRateChoice { rate: None, source: GrowthRateSource::None },
    }
}

/// Round to `decimals` places, half to even on the scaled value
///
/// Matches array-library rounding: 0.125 -> 0.12, 0.375 -> 0.38.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

/// `price * (1 + rate)^years`, rounded; missing if either input is missing
pub fn forecast_price(price: Option<f64>, rate: Option<f64>, years: u32, decimals: u32) -> Option<f64> {
    let price = price?;
    let rate = rate?;
    Some(round_to(price * (1.0 + rate).powf(f64::from(years)), decimals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_locality_preferred() {
        let choice = choose_growth_rate(Some(0.10), Some(0.05));
        assert_eq!(choice.rate, Some(0.10));
        assert_eq!(choice.source, GrowthRateSource::Locality);
    }

    #[test]
    fn test_city_fallback() {
        let choice = choose_growth_rate(None, Some(0.04));
        assert_eq!(choice.rate, Some(0.04));
        assert_eq!(choice.source, GrowthRateSource::City);
    }

    #[test]
    fn test_no_rate() {
        let choice = choose_growth_rate(None, None);
        assert_eq!(choice.rate, None);
        assert_eq!(choice.source, GrowthRateSource::None);
    }

    #[test]
    fn test_negative_locality_still_wins() {
        let choice = choose_growth_rate(Some(-0.02), Some(0.06));
        assert_eq!(choice.rate, Some(-0.02));
        assert_eq!(choice.source, GrowthRateSource::Locality);
    }

    #[test]
    fn test_forecast_compounding() {
        assert_eq!(forecast_price(Some(100.0), Some(0.10), 1, 2), Some(110.0));
        assert_eq!(forecast_price(Some(100.0), Some(0.10), 2, 2), Some(121.0));
        assert_eq!(forecast_price(Some(100.0), Some(0.10), 3, 2), Some(133.1));
        assert_eq!(forecast_price(Some(200.0), Some(0.04), 1, 2), Some(208.0));
    }

    #[test]
    fn test_forecast_three_year_tie_rounding() {
        // (1.025)^3 via pow lands just below the .5 cent tie
        assert_eq!(forecast_price(Some(3520.0), Some(0.025), 3, 2), Some(3790.65));
        assert_eq!(
            forecast_price(Some(3520.0), Some(0.025), 3, 2),
            Some(round_to(3520.0 * 1.025f64.powf(3.0), 2))
        );
    }

    #[test]
    fn test_forecast_missing_operands() {
        assert_eq!(forecast_price(None, Some(0.10), 1, 2), None);
        assert_eq!(forecast_price(Some(100.0), None, 1, 2), None);
        assert_eq!(forecast_price(None, None, 3, 2), None);
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(1234.5678, 2), 1234.57);
        assert_relative_eq!(round_to(0.125, 2), 0.12);
        assert_relative_eq!(round_to(0.375, 2), 0.38);
        assert_relative_eq!(round_to(2.5, 0), 2.0);
        assert_relative_eq!(round_to(-1.005, 1), -1.0);
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(GrowthRateSource::Locality.to_string(), "locality");
        assert_eq!(GrowthRateSource::City.to_string(), "city");
        assert_eq!(GrowthRateSource::None.as_str(), "none");
    }
}
