use serde::{Deserialize, Serialize};

use crate::planner::constants::*;

/// Rate-based intake goals for one exercise session.
///
/// Values are expected to be clamped by the caller before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateInputs {
    pub carbs_per_hour: f64,
    pub sodium_per_liter: f64,
    pub fluid_per_hour: f64,
    pub duration_minutes: f64,
}

impl Default for RateInputs {
    fn default() -> Self {
        Self {
            carbs_per_hour: DEFAULT_CARBS_PER_HOUR,
            sodium_per_liter: DEFAULT_SODIUM_PER_LITER,
            fluid_per_hour: DEFAULT_FLUID_PER_HOUR,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl RateInputs {
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes / MINUTES_PER_HOUR
    }
}

/// Absolute nutrient goals for the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTargets {
    /// Grams.
    pub carbs: f64,
    /// Milliliters.
    pub fluid: f64,
    /// Milligrams.
    pub sodium: f64,
}

/// Derive session targets from rates.
///
/// Sodium is specified per liter of fluid, so it chains on the fluid target
/// rather than on duration directly.
pub fn derive_targets(rates: &RateInputs) -> SessionTargets {
    let hours = rates.duration_hours();
    let carbs = rates.carbs_per_hour * hours;
    let fluid = rates.fluid_per_hour * hours;
    let sodium = (fluid / ML_PER_LITER) * rates.sodium_per_liter;

    SessionTargets {
        carbs,
        fluid,
        sodium,
    }
}
