use serde::Serialize;

use crate::models::{BarData, BarSegment, Nutrient, Product};
use crate::planner::aggregation::{Aggregation, ColorPolicy, aggregate};
use crate::planner::constants::TARGET_HEADROOM;
use crate::planner::targets::{RateInputs, SessionTargets, derive_targets};
use crate::state::Selection;

/// Horizontal placement of one segment label, as fractions of the bar scale.
///
/// A segment is drawn as `item_count` blocks of `item_width` each.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPosition {
    pub label: String,
    pub left: f64,
    pub width: f64,
    pub item_width: f64,
    pub item_count: u32,
}

impl LabelPosition {
    /// Left edge of every item block in the segment.
    pub fn item_offsets(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.item_count).map(|i| self.left + f64::from(i) * self.item_width)
    }
}

/// Geometry needed to draw a single bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarLayout {
    pub total: f64,
    pub max_val: f64,
    /// Filled share of the bar scale.
    pub bar_fraction: f64,
    /// Target marker position on the bar scale.
    pub target_fraction: f64,
    pub show_target_line: bool,
    pub labels: Vec<LabelPosition>,
}

/// Assemble the fluid, carbs, and sodium bars.
pub fn build_bars(targets: &SessionTargets, aggregation: &Aggregation) -> [BarData; 3] {
    Nutrient::ALL.map(|nutrient| {
        let target = match nutrient {
            Nutrient::Fluid => targets.fluid,
            Nutrient::Carbs => targets.carbs,
            Nutrient::Sodium => targets.sodium,
        };
        BarData {
            segments: aggregation.segments(nutrient).to_vec(),
            ..BarData::new(nutrient, target)
        }
    })
}

/// Full recompute from one input snapshot: targets, aggregation, bars.
pub fn plan_bars(
    catalog: &[Product],
    selection: &Selection,
    rates: &RateInputs,
    policy: ColorPolicy,
) -> [BarData; 3] {
    let targets = derive_targets(rates);
    let aggregation = aggregate(catalog, selection, policy);
    build_bars(&targets, &aggregation)
}

/// Bar scale: the larger of the stacked total and the target plus headroom.
#[inline]
pub fn max_val(total: f64, target: f64) -> f64 {
    total.max(target * TARGET_HEADROOM)
}

/// The deficit marker is drawn only while the target is not yet met.
#[inline]
pub fn show_target_line(total: f64, target: f64) -> bool {
    total < target
}

/// `value / max_val`, or 0 on an empty scale.
#[inline]
pub fn fraction(value: f64, max_val: f64) -> f64 {
    if max_val > 0.0 { value / max_val } else { 0.0 }
}

/// Left-to-right label placement matching stacking order.
pub fn label_positions(segments: &[BarSegment], max_val: f64) -> Vec<LabelPosition> {
    let mut cumulative = 0.0;
    segments
        .iter()
        .map(|seg| {
            let total = seg.total();
            let position = LabelPosition {
                label: seg.label.clone(),
                left: fraction(cumulative, max_val),
                width: fraction(total, max_val),
                item_width: fraction(seg.value_per_item, max_val),
                item_count: seg.item_count,
            };
            cumulative += total;
            position
        })
        .collect()
}

/// Compute drawing geometry for a bar.
pub fn layout(bar: &BarData) -> BarLayout {
    let total = bar.total();
    let max_val = max_val(total, bar.target);
    BarLayout {
        total,
        max_val,
        bar_fraction: fraction(total, max_val),
        target_fraction: fraction(bar.target, max_val),
        show_target_line: show_target_line(total, bar.target),
        labels: label_positions(&bar.segments, max_val),
    }
}

/// Signed, rounded difference, e.g. "+20" or "-150".
///
/// Halves round up (toward positive infinity), so -50.5 shows as "-50".
pub fn diff_string(value: f64, target: f64) -> String {
    let diff = (value - target + 0.5).floor();
    if diff >= 0.0 {
        format!("+{}", diff.abs())
    } else {
        format!("{}", diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(label: &str, value: f64, count: u32) -> BarSegment {
        BarSegment {
            label: label.to_string(),
            value_per_item: value,
            item_count: count,
            color: "#ffffff".to_string(),
        }
    }

    #[test]
    fn test_max_val_headroom() {
        assert!((max_val(50.0, 100.0) - 120.0).abs() < 1e-9);
        assert!((max_val(150.0, 100.0) - 150.0).abs() < 1e-9);
        assert_eq!(max_val(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_target_line_visibility() {
        assert!(show_target_line(90.0, 100.0));
        assert!(!show_target_line(100.0, 100.0));
        assert!(!show_target_line(120.0, 100.0));
    }

    #[test]
    fn test_label_positions_accumulate() {
        let segments = vec![segment("A", 30.0, 2), segment("B", 20.0, 1)];
        let positions = label_positions(&segments, 100.0);
        assert_eq!(positions.len(), 2);
        assert!((positions[0].left - 0.0).abs() < 1e-9);
        assert!((positions[0].width - 0.6).abs() < 1e-9);
        assert!((positions[1].left - 0.6).abs() < 1e-9);
        assert!((positions[1].width - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_item_blocks_split_segment() {
        let segments = vec![segment("A", 30.0, 2), segment("B", 20.0, 1)];
        let positions = label_positions(&segments, 100.0);

        assert_eq!(positions[0].item_count, 2);
        assert!((positions[0].item_width - 0.3).abs() < 1e-9);
        let offsets: Vec<f64> = positions[0].item_offsets().collect();
        assert_eq!(offsets.len(), 2);
        assert!((offsets[0] - 0.0).abs() < 1e-9);
        assert!((offsets[1] - 0.3).abs() < 1e-9);

        assert!((positions[1].item_width - 0.2).abs() < 1e-9);
        assert_eq!(positions[1].item_offsets().count(), 1);
    }

    #[test]
    fn test_layout_zero_scale() {
        let bar = BarData::new(Nutrient::Fluid, 0.0);
        let layout = layout(&bar);
        assert_eq!(layout.max_val, 0.0);
        assert_eq!(layout.bar_fraction, 0.0);
        assert_eq!(layout.target_fraction, 0.0);
        assert!(!layout.show_target_line);
        assert!(layout.labels.is_empty());
    }

    #[test]
    fn test_layout_under_target() {
        let mut bar = BarData::new(Nutrient::Carbs, 100.0);
        bar.segments.push(segment("Gel", 30.0, 3));
        let layout = layout(&bar);
        assert!((layout.total - 90.0).abs() < 1e-9);
        assert!((layout.max_val - 120.0).abs() < 1e-9);
        assert!((layout.bar_fraction - 0.75).abs() < 1e-9);
        assert!(layout.show_target_line);
    }

    #[test]
    fn test_diff_string() {
        assert_eq!(diff_string(120.0, 100.0), "+20");
        assert_eq!(diff_string(100.0, 100.0), "+0");
        assert_eq!(diff_string(50.4, 200.0), "-150");
    }

    #[test]
    fn test_diff_string_halves_round_up() {
        assert_eq!(diff_string(50.0, 100.5), "-50");
        assert_eq!(diff_string(100.5, 100.0), "+1");
        assert_eq!(diff_string(99.5, 100.0), "+0");
    }
}
