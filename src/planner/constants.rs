/// Sodium fraction of table salt by mass.
pub const SODIUM_IN_SALT_RATIO: f64 = 0.393;

/// Milligrams per gram.
pub const MG_PER_GRAM: f64 = 1000.0;

/// Milliliters per liter.
pub const ML_PER_LITER: f64 = 1000.0;

pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Headroom above the target on each bar's scale (1.2 = +20%).
pub const TARGET_HEADROOM: f64 = 1.2;

/// Serving string for records of unknown shape.
pub const SERVING_SIZE_FALLBACK: &str = "N/A";

// ─────────────────────────────────────────────────────────────────────────────
// Rate input defaults and ranges
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_CARBS_PER_HOUR: f64 = 100.0;
pub const DEFAULT_SODIUM_PER_LITER: f64 = 1500.0;
pub const DEFAULT_FLUID_PER_HOUR: f64 = 800.0;
pub const DEFAULT_DURATION_MINUTES: f64 = 360.0;

pub const MAX_CARBS_PER_HOUR: f64 = 120.0;
pub const MAX_SODIUM_PER_LITER: f64 = 2000.0;
pub const MAX_FLUID_PER_HOUR: f64 = 2000.0;
pub const MAX_DURATION_MINUTES: f64 = 10000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Palette for first-selected-wins coloring. Cycles when exhausted.
pub const BAR_COLORS: [&str; 10] = [
    "#60a5fa", // blue
    "#f87171", // red
    "#34d399", // green
    "#fbbf24", // amber
    "#a78bfa", // violet
    "#f472b6", // pink
    "#2dd4bf", // teal
    "#fb923c", // orange
    "#a3e635", // lime
    "#94a3b8", // slate
];

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum Jaro-Winkler similarity for a fuzzy catalog match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum fuzzy candidates offered in a selection prompt.
pub const MAX_SEARCH_CANDIDATES: usize = 5;
