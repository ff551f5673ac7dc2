use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BarSegment, Nutrient, Product};
use crate::planner::constants::BAR_COLORS;
use crate::planner::nutrients;
use crate::state::Selection;

/// How bar segments get their color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorPolicy {
    /// Each product's fixed `metaColor` from the catalog.
    #[default]
    Meta,
    /// Palette colors handed out in catalog order to selected products.
    Palette,
}

/// Palette color assignment for a single aggregation pass.
///
/// The first label to ask gets the next palette color; later requests for the
/// same label reuse it. Never shared between passes.
#[derive(Debug)]
pub struct ColorAssigner<'p> {
    palette: &'p [&'p str],
    assigned: HashMap<String, String>,
    next_index: usize,
}

impl<'p> ColorAssigner<'p> {
    pub fn new(palette: &'p [&'p str]) -> Self {
        Self {
            palette,
            assigned: HashMap::new(),
            next_index: 0,
        }
    }

    /// Color for `label`, assigning the next palette entry on first use.
    pub fn color_for(&mut self, label: &str) -> String {
        if let Some(color) = self.assigned.get(label) {
            return color.clone();
        }
        let color = if self.palette.is_empty() {
            String::new()
        } else {
            self.palette[self.next_index % self.palette.len()].to_string()
        };
        self.next_index += 1;
        self.assigned.insert(label.to_string(), color.clone());
        color
    }
}

/// Per-nutrient segment lists, each in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub fluid: Vec<BarSegment>,
    pub carbs: Vec<BarSegment>,
    pub sodium: Vec<BarSegment>,
}

impl Aggregation {
    pub fn segments(&self, nutrient: Nutrient) -> &[BarSegment] {
        match nutrient {
            Nutrient::Fluid => &self.fluid,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Sodium => &self.sodium,
        }
    }

    fn segments_mut(&mut self, nutrient: Nutrient) -> &mut Vec<BarSegment> {
        match nutrient {
            Nutrient::Fluid => &mut self.fluid,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Sodium => &mut self.sodium,
        }
    }

    /// Sum of segment totals for one nutrient.
    pub fn total(&self, nutrient: Nutrient) -> f64 {
        self.segments(nutrient).iter().map(BarSegment::total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fluid.is_empty() && self.carbs.is_empty() && self.sodium.is_empty()
    }
}

/// Per-serving amount of `nutrient` in `item`.
pub fn unit_value(item: &Product, nutrient: Nutrient) -> f64 {
    match nutrient {
        Nutrient::Fluid => nutrients::fluid_volume_milliliters(item),
        Nutrient::Carbs => nutrients::carbs_grams(item),
        Nutrient::Sodium => nutrients::sodium_milligrams(item),
    }
}

/// Fold the selection over the catalog into per-nutrient segments.
///
/// Unselected products are skipped. A selected product only gets a segment
/// for nutrients it actually provides (strictly positive per serving).
pub fn aggregate(catalog: &[Product], selection: &Selection, policy: ColorPolicy) -> Aggregation {
    let mut result = Aggregation::default();
    let mut colors = ColorAssigner::new(&BAR_COLORS);

    for item in catalog {
        let count = selection.count(&nutrients::item_key(item));
        if count == 0 {
            continue;
        }

        let label = nutrients::item_label(item);
        let color = match policy {
            ColorPolicy::Meta => item.meta_color.clone(),
            ColorPolicy::Palette => colors.color_for(&label),
        };

        for nutrient in Nutrient::ALL {
            let value_per_item = unit_value(item, nutrient);
            if value_per_item > 0.0 {
                result.segments_mut(nutrient).push(BarSegment {
                    label: label.clone(),
                    value_per_item,
                    item_count: count,
                    color: color.clone(),
                });
            }
        }
    }

    debug!(
        fluid = result.fluid.len(),
        carbs = result.carbs.len(),
        sodium = result.sodium.len(),
        "aggregated selection"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NutritionFacts, Serving};

    fn product(name: &str, carbs: f64, sodium: f64, serving: Serving, color: &str) -> Product {
        Product {
            brand: "Test".to_string(),
            name: name.to_string(),
            flavor: None,
            facts: NutritionFacts {
                kilocalories: carbs * 4.0,
                carbohydrates_grams: Some(carbs),
                sodium_milligrams: Some(sodium),
                ..Default::default()
            },
            meta_color: color.to_string(),
            serving,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(
                "Mix",
                40.0,
                300.0,
                Serving::DrinkMix {
                    equates_to_milliliters: 500.0,
                    serving_size_grams: Some(45.0),
                },
                "#111111",
            ),
            product(
                "Gel",
                25.0,
                0.0,
                Serving::Gel {
                    serving_size_grams: 40.0,
                    glucose_to_fructose_ratio: None,
                },
                "#222222",
            ),
            product(
                "Caps",
                0.0,
                215.0,
                Serving::Capsule {
                    serving_size_units: 1.0,
                },
                "#333333",
            ),
        ]
    }

    #[test]
    fn test_color_assigner_memoizes_and_cycles() {
        let palette = ["#a", "#b"];
        let mut colors = ColorAssigner::new(&palette);
        assert_eq!(colors.color_for("one"), "#a");
        assert_eq!(colors.color_for("two"), "#b");
        assert_eq!(colors.color_for("one"), "#a");
        assert_eq!(colors.color_for("three"), "#a");
    }

    #[test]
    fn test_sparse_segments() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set(&nutrients::item_key(&items[1]), 2);
        selection.set(&nutrients::item_key(&items[2]), 1);

        let agg = aggregate(&items, &selection, ColorPolicy::Meta);

        // Gel has no sodium and caps have no carbs; neither has fluid
        assert!(agg.fluid.is_empty());
        assert_eq!(agg.carbs.len(), 1);
        assert_eq!(agg.carbs[0].label, "Test Gel");
        assert_eq!(agg.sodium.len(), 1);
        assert_eq!(agg.sodium[0].label, "Test Caps");
        assert_eq!(agg.sodium[0].color, "#333333");
    }

    #[test]
    fn test_catalog_order_not_selection_order() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set(&nutrients::item_key(&items[1]), 1);
        selection.set(&nutrients::item_key(&items[0]), 1);

        let agg = aggregate(&items, &selection, ColorPolicy::Meta);
        let labels: Vec<&str> = agg.carbs.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Test Mix", "Test Gel"]);
    }

    #[test]
    fn test_palette_follows_catalog_order() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set(&nutrients::item_key(&items[2]), 1);
        selection.set(&nutrients::item_key(&items[1]), 1);

        let agg = aggregate(&items, &selection, ColorPolicy::Palette);
        assert_eq!(agg.carbs[0].color, BAR_COLORS[0]);
        assert_eq!(agg.sodium[0].color, BAR_COLORS[1]);

        // A fresh pass starts the palette over
        let again = aggregate(&items, &selection, ColorPolicy::Palette);
        assert_eq!(again, agg);
    }

    #[test]
    fn test_empty_selection() {
        let agg = aggregate(&catalog(), &Selection::new(), ColorPolicy::Meta);
        assert!(agg.is_empty());
        for nutrient in Nutrient::ALL {
            assert_eq!(agg.total(nutrient), 0.0);
        }
    }
}
