use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::interface::input::{InputRange, RateRanges};
use crate::planner::constants::MAX_SEARCH_CANDIDATES;
use crate::planner::{item_key, item_label, RateInputs};
use crate::state::Catalog;

/// Upper bound for a single product count.
const MAX_ITEM_COUNT: f64 = 999.0;

/// What to do with the chosen product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    Add,
    Remove,
    Set(u32),
    Cancel,
}

/// Prompt for one rate value; bad text becomes 0 and values are clamped.
pub fn prompt_rate(prompt: &str, default: f64, range: &InputRange) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!("{} [{}-{}]", prompt, range.min, range.max))
        .default(default.to_string())
        .interact_text()?;

    Ok(range.parse(&input))
}

/// Prompt for all four rate inputs.
pub fn prompt_rates(defaults: &RateInputs, ranges: &RateRanges) -> Result<RateInputs> {
    Ok(RateInputs {
        carbs_per_hour: prompt_rate(
            "Carbs (g/h)",
            defaults.carbs_per_hour,
            &ranges.carbs_per_hour,
        )?,
        sodium_per_liter: prompt_rate(
            "Sodium (mg/L)",
            defaults.sodium_per_liter,
            &ranges.sodium_per_liter,
        )?,
        fluid_per_hour: prompt_rate(
            "Fluid (ml/h)",
            defaults.fluid_per_hour,
            &ranges.fluid_per_hour,
        )?,
        duration_minutes: prompt_rate(
            "Exercise duration (minutes)",
            defaults.duration_minutes,
            &ranges.duration_minutes,
        )?,
    })
}

/// Search the catalog and let the user pick one product.
///
/// Returns the item key, or `None` when the user enters nothing.
pub fn prompt_product(catalog: &Catalog) -> Result<Option<String>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Search products (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let candidates = catalog.search(input);

        if candidates.is_empty() {
            println!("No matching product found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let product = candidates[0];
            let label = item_label(product);
            if label.to_lowercase() == input.to_lowercase() {
                return Ok(Some(item_key(product)));
            }

            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", label))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(Some(item_key(product)));
            }
            continue;
        }

        // Multiple matches - let user select
        let shown: Vec<_> = candidates.into_iter().take(MAX_SEARCH_CANDIDATES).collect();
        let mut options: Vec<String> = shown.iter().map(|p| item_label(p)).collect();
        options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection < shown.len() {
            return Ok(Some(item_key(shown[selection])));
        }
    }
}

/// Ask how to change the count of a product.
pub fn prompt_selection_action(label: &str, current: u32) -> Result<SelectionAction> {
    let options = ["Add one", "Remove one", "Set count", "Cancel"];

    let choice = Select::new()
        .with_prompt(format!("{} (currently {})", label, current))
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => SelectionAction::Add,
        1 => SelectionAction::Remove,
        2 => SelectionAction::Set(prompt_count(current)?),
        _ => SelectionAction::Cancel,
    })
}

/// Prompt for an exact item count.
pub fn prompt_count(current: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("How many?")
        .default(current.to_string())
        .interact_text()?;

    let range = InputRange::new(0.0, MAX_ITEM_COUNT);
    Ok(range.parse(&input).floor() as u32)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
