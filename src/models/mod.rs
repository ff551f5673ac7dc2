pub mod chart;
pub mod product;

pub use chart::{BarData, BarSegment, Nutrient};
pub use product::{NutritionFacts, Product, ProductRecord, Serving};
