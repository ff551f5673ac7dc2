use serde::{Deserialize, Serialize};

use crate::planner::constants::*;
use crate::planner::RateInputs;

/// Inclusive bounds for a numeric user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp an already-parsed value. NaN becomes 0.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            0.0
        } else if value > self.max {
            self.max
        } else if value < self.min {
            self.min
        } else {
            value
        }
    }

    /// Parse raw text and clamp it.
    ///
    /// Empty or non-numeric text resolves to 0 rather than an error.
    pub fn parse(&self, raw: &str) -> f64 {
        let raw = raw.trim();
        if raw.is_empty() {
            return 0.0;
        }
        match raw.parse::<f64>() {
            Ok(value) => self.clamp(value),
            Err(_) => 0.0,
        }
    }
}

/// Allowed ranges for the four rate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateRanges {
    pub carbs_per_hour: InputRange,
    pub sodium_per_liter: InputRange,
    pub fluid_per_hour: InputRange,
    pub duration_minutes: InputRange,
}

impl Default for RateRanges {
    fn default() -> Self {
        Self {
            carbs_per_hour: InputRange::new(0.0, MAX_CARBS_PER_HOUR),
            sodium_per_liter: InputRange::new(0.0, MAX_SODIUM_PER_LITER),
            fluid_per_hour: InputRange::new(0.0, MAX_FLUID_PER_HOUR),
            duration_minutes: InputRange::new(0.0, MAX_DURATION_MINUTES),
        }
    }
}

impl RateRanges {
    /// Clamp every field of `rates` into range.
    pub fn clamp(&self, rates: &RateInputs) -> RateInputs {
        RateInputs {
            carbs_per_hour: self.carbs_per_hour.clamp(rates.carbs_per_hour),
            sodium_per_liter: self.sodium_per_liter.clamp(rates.sodium_per_liter),
            fluid_per_hour: self.fluid_per_hour.clamp(rates.fluid_per_hour),
            duration_minutes: self.duration_minutes.clamp(rates.duration_minutes),
        }
    }
}

/// Format a duration as "6 h 0 min".
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.max(0.0).floor() as u64;
    format!("{} h {} min", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: InputRange = InputRange::new(0.0, 120.0);

    #[test]
    fn test_parse_substitutes_zero() {
        assert_eq!(RANGE.parse(""), 0.0);
        assert_eq!(RANGE.parse("   "), 0.0);
        assert_eq!(RANGE.parse("abc"), 0.0);
        assert_eq!(RANGE.parse("NaN"), 0.0);
    }

    #[test]
    fn test_parse_clamps() {
        assert_eq!(RANGE.parse("150"), 120.0);
        assert_eq!(RANGE.parse("-5"), 0.0);
        assert_eq!(RANGE.parse("inf"), 120.0);
        assert_eq!(RANGE.parse(" 75.5 "), 75.5);
    }

    #[test]
    fn test_zero_even_with_positive_min() {
        let range = InputRange::new(10.0, 20.0);
        assert_eq!(range.parse("x"), 0.0);
        assert_eq!(range.parse("5"), 10.0);
    }

    #[test]
    fn test_clamp_rates() {
        let rates = RateInputs {
            carbs_per_hour: 500.0,
            sodium_per_liter: -1.0,
            fluid_per_hour: 600.0,
            duration_minutes: 20000.0,
        };
        let clamped = RateRanges::default().clamp(&rates);
        assert_eq!(clamped.carbs_per_hour, 120.0);
        assert_eq!(clamped.sodium_per_liter, 0.0);
        assert_eq!(clamped.fluid_per_hour, 600.0);
        assert_eq!(clamped.duration_minutes, 10000.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(360.0), "6 h 0 min");
        assert_eq!(format_duration(95.0), "1 h 35 min");
    }
}
