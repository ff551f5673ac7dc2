use serde::Serialize;

/// The three nutrients tracked against session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Fluid,
    Carbs,
    Sodium,
}

impl Nutrient {
    /// Bar order, top to bottom.
    pub const ALL: [Nutrient; 3] = [Nutrient::Fluid, Nutrient::Carbs, Nutrient::Sodium];

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Fluid => "fluid",
            Nutrient::Carbs => "carbs",
            Nutrient::Sodium => "sodium",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Fluid => "ml",
            Nutrient::Carbs => "g",
            Nutrient::Sodium => "mg",
        }
    }
}

/// One selected product's contribution to a single nutrient bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSegment {
    /// Product label, e.g. "Maurten Gel 100".
    pub label: String,
    pub value_per_item: f64,
    pub item_count: u32,
    /// Hex color code.
    pub color: String,
}

impl BarSegment {
    /// Contribution of all items in this segment.
    #[inline]
    pub fn total(&self) -> f64 {
        self.value_per_item * self.item_count as f64
    }
}

/// Target-vs-actual data for one nutrient bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarData {
    pub label: String,
    pub unit: String,
    pub target: f64,
    pub segments: Vec<BarSegment>,
}

impl BarData {
    /// Empty bar for a nutrient with the given target.
    pub fn new(nutrient: Nutrient, target: f64) -> Self {
        Self {
            label: nutrient.label().to_string(),
            unit: nutrient.unit().to_string(),
            target,
            segments: Vec::new(),
        }
    }

    /// Sum of all segment totals.
    pub fn total(&self) -> f64 {
        self.segments.iter().map(BarSegment::total).sum()
    }
}
