use serde::{Deserialize, Deserializer, Serialize};

/// Nutrition facts for one serving as printed on the label.
///
/// Only `kilocalories` is mandatory; everything else is optional in the
/// catalog and absent values mean "no contribution".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFacts {
    pub kilocalories: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat_grams: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars_grams: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_grams: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt_grams: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caffeine_milligrams: Option<f64>,

    // Electrolytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chloride_milligrams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium_milligrams: Option<f64>,
    /// `null` in the data file counts as a present figure of zero, so it
    /// still takes precedence over `salt_grams`.
    #[serde(
        default,
        deserialize_with = "present_or_zero",
        skip_serializing_if = "Option::is_none"
    )]
    pub sodium_milligrams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium_milligrams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnesium_milligrams: Option<f64>,
}

/// Deserialize a field that is present in the record; `null` becomes zero.
///
/// Only called when the key exists, so an absent key still falls back to
/// the field default.
fn present_or_zero<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or(0.0)))
}

/// What one serving of a product physically is.
#[derive(Debug, Clone, PartialEq)]
pub enum Serving {
    /// Powder mixed into water; `equates_to_milliliters` is the mixed volume.
    DrinkMix {
        equates_to_milliliters: f64,
        serving_size_grams: Option<f64>,
    },
    Drink {
        serving_size_milliliters: f64,
    },
    Gel {
        serving_size_grams: f64,
        glucose_to_fructose_ratio: Option<f64>,
    },
    Capsule {
        serving_size_units: f64,
    },
    /// A record carrying none of the known serving fields.
    Unrecognized,
}

impl Serving {
    /// Short name of the serving shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Serving::DrinkMix { .. } => "drink mix",
            Serving::Drink { .. } => "drink",
            Serving::Gel { .. } => "gel",
            Serving::Capsule { .. } => "capsule",
            Serving::Unrecognized => "unknown",
        }
    }
}

/// A catalog record exactly as stored in the JSON data files.
///
/// The serving shape is implied by which optional fields are present; use
/// `Product::from` to resolve it once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub brand: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    pub nutrition_facts_per_serving: NutritionFacts,
    pub meta_color: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equates_to_milliliters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size_milliliters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose_to_fructose_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size_units: Option<f64>,
}

impl ProductRecord {
    /// Resolve the serving shape from field presence.
    ///
    /// Precedence: drink mix, drink, capsule, gel.
    pub fn serving(&self) -> Serving {
        if let Some(ml) = self.equates_to_milliliters {
            return Serving::DrinkMix {
                equates_to_milliliters: ml,
                serving_size_grams: self.serving_size_grams,
            };
        }
        if let Some(ml) = self.serving_size_milliliters {
            return Serving::Drink {
                serving_size_milliliters: ml,
            };
        }
        if let Some(units) = self.serving_size_units {
            return Serving::Capsule {
                serving_size_units: units,
            };
        }
        if let Some(grams) = self.serving_size_grams {
            return Serving::Gel {
                serving_size_grams: grams,
                glucose_to_fructose_ratio: self.glucose_to_fructose_ratio,
            };
        }
        Serving::Unrecognized
    }
}

/// A sports-nutrition product with its serving shape resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub brand: String,
    pub name: String,
    pub flavor: Option<String>,
    pub facts: NutritionFacts,
    pub meta_color: String,
    pub serving: Serving,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let serving = record.serving();
        Self {
            brand: record.brand,
            name: record.name,
            flavor: record.flavor,
            facts: record.nutrition_facts_per_serving,
            meta_color: record.meta_color,
            serving,
        }
    }
}

impl Product {
    /// Basic validation: a `#rrggbb`-style color and no negative amounts.
    pub fn is_valid(&self) -> bool {
        let f = &self.facts;
        let amounts = [
            Some(f.kilocalories),
            f.fat_grams,
            f.saturated_fat_grams,
            f.carbohydrates_grams,
            f.sugars_grams,
            f.fiber_grams,
            f.protein_grams,
            f.salt_grams,
            f.caffeine_milligrams,
            f.chloride_milligrams,
            f.potassium_milligrams,
            f.sodium_milligrams,
            f.calcium_milligrams,
            f.magnesium_milligrams,
        ];
        is_hex_color(&self.meta_color)
            && amounts.into_iter().flatten().all(|v| v >= 0.0)
            && !matches!(self.serving, Serving::Unrecognized)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} {} [{}]: {} kcal, C:{:?} Na:{:?} salt:{:?}",
            self.brand,
            self.name,
            self.serving.kind(),
            self.facts.kilocalories,
            self.facts.carbohydrates_grams,
            self.facts.sodium_milligrams,
            self.facts.salt_grams
        )
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
