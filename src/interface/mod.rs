pub mod input;
pub mod prompts;
pub mod render;

pub use input::{format_duration, InputRange, RateRanges};
pub use prompts::{
    prompt_count, prompt_product, prompt_rate, prompt_rates, prompt_selection_action,
    prompt_yes_no, SelectionAction,
};
pub use render::{display_bars, display_catalog, render_bar, write_csv, write_json};
