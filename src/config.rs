use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interface::RateRanges;
use crate::planner::{ColorPolicy, RateInputs};

/// Planner settings, loadable from a JSON file.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    /// Starting rate values.
    pub rates: RateInputs,
    pub color_policy: ColorPolicy,
    /// Bounds applied to every rate input.
    pub ranges: RateRanges,
}

impl PlannerConfig {
    /// Read a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Default rates clamped into the configured ranges.
    pub fn default_rates(&self) -> RateInputs {
        self.ranges.clamp(&self.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config() {
        let json = r#"{"rates": {"carbsPerHour": 70, "durationMinutes": 480}, "colorPolicy": "palette"}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = PlannerConfig::load(file.path()).unwrap();
        assert_eq!(config.color_policy, ColorPolicy::Palette);
        assert_eq!(config.rates.carbs_per_hour, 70.0);
        assert_eq!(config.rates.duration_minutes, 480.0);
        // Unset fields keep their defaults
        assert_eq!(config.rates.fluid_per_hour, 800.0);
        assert_eq!(config.ranges, RateRanges::default());
    }

    #[test]
    fn test_default_rates_clamped() {
        let config = PlannerConfig {
            rates: RateInputs {
                carbs_per_hour: 200.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.default_rates().carbs_per_hour, 120.0);
    }

    #[test]
    fn test_missing_file() {
        assert!(PlannerConfig::load("/nonexistent/fuel_config.json").is_err());
    }
}
