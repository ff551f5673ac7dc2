pub mod aggregation;
pub mod chart;
pub mod constants;
pub mod nutrients;
pub mod targets;

pub use aggregation::{aggregate, unit_value, Aggregation, ColorAssigner, ColorPolicy};
pub use chart::{
    build_bars, diff_string, label_positions, layout, max_val, plan_bars, show_target_line,
    BarLayout, LabelPosition,
};
pub use constants::*;
pub use nutrients::{
    carbs_grams, fluid_volume_milliliters, item_key, item_label, serving_size_string,
    sodium_milligrams,
};
pub use targets::{derive_targets, RateInputs, SessionTargets};
