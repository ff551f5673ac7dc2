//! Per-serving nutrient normalization.
//!
//! Every function here is total: a field missing from the catalog record
//! means the product contributes nothing for that quantity.

use crate::models::{Product, Serving};
use crate::planner::constants::{MG_PER_GRAM, SERVING_SIZE_FALLBACK, SODIUM_IN_SALT_RATIO};

/// Carbohydrates per serving in grams.
pub fn carbs_grams(item: &Product) -> f64 {
    item.facts.carbohydrates_grams.unwrap_or(0.0)
}

/// Sodium per serving in milligrams.
///
/// A direct sodium figure always wins; otherwise it is derived from salt.
pub fn sodium_milligrams(item: &Product) -> f64 {
    if let Some(sodium) = item.facts.sodium_milligrams {
        return sodium;
    }
    match item.facts.salt_grams {
        Some(salt) => salt * MG_PER_GRAM * SODIUM_IN_SALT_RATIO,
        None => 0.0,
    }
}

/// Fluid volume per serving in milliliters.
///
/// Drink mixes count their mixed volume; gels and capsules carry no fluid.
pub fn fluid_volume_milliliters(item: &Product) -> f64 {
    match item.serving {
        Serving::DrinkMix {
            equates_to_milliliters,
            ..
        } => equates_to_milliliters,
        Serving::Drink {
            serving_size_milliliters,
        } => serving_size_milliliters,
        _ => 0.0,
    }
}

/// Human-readable serving size, e.g. "83g", "500ml", "2 capsules".
pub fn serving_size_string(item: &Product) -> String {
    match item.serving {
        Serving::DrinkMix {
            serving_size_grams: Some(grams),
            ..
        }
        | Serving::Gel {
            serving_size_grams: grams,
            ..
        } => format!("{}g", grams),
        Serving::Drink {
            serving_size_milliliters,
        } => format!("{}ml", serving_size_milliliters),
        Serving::Capsule { serving_size_units } => {
            let plural = if serving_size_units > 1.0 { "s" } else { "" };
            format!("{} capsule{}", serving_size_units, plural)
        }
        _ => SERVING_SIZE_FALLBACK.to_string(),
    }
}

/// Stable selection key: `brand-name-flavor`, lowercased, punctuation as `_`.
pub fn item_key(item: &Product) -> String {
    [
        item.brand.as_str(),
        item.name.as_str(),
        item.flavor.as_deref().unwrap_or(""),
    ]
    .into_iter()
    .map(key_part)
    .collect::<Vec<_>>()
    .join("-")
}

/// Display label used for bar segments.
pub fn item_label(item: &Product) -> String {
    format!(
        "{} {} {}",
        item.brand,
        item.name,
        item.flavor.as_deref().unwrap_or("")
    )
    .trim()
    .to_string()
}

/// Normalize one key component.
///
/// Each run of non-alphanumeric characters becomes a single `_`, so spacing
/// and punctuation differences do not split one product into two keys.
fn key_part(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut in_gap = false;
    for c in part.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            out.push('_');
            in_gap = true;
        }
    }
    out
}
