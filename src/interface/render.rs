use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::interface::input::format_duration;
use crate::models::{BarData, Product};
use crate::planner::{
    carbs_grams, diff_string, fluid_volume_milliliters, item_key, item_label, layout,
    serving_size_string, sodium_milligrams, BarLayout, RateInputs, SessionTargets,
};

/// Character width of a rendered bar.
pub const BAR_WIDTH: usize = 60;

/// Fill characters cycled per segment so neighbours stay distinguishable.
const SEGMENT_FILLS: [char; 3] = ['█', '▓', '▒'];

/// Drawn on the first cell of each item block after the first in a segment.
const ITEM_BOUNDARY: char = '▕';

/// A bar with its layout, as written by the JSON report.
#[derive(Debug, Serialize)]
struct BarReport<'a> {
    #[serde(flatten)]
    bar: &'a BarData,
    layout: BarLayout,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    rates: &'a RateInputs,
    targets: &'a SessionTargets,
    bars: Vec<BarReport<'a>>,
}

/// Number of cells covering `fraction` of the bar.
fn cells(fraction: f64) -> usize {
    ((fraction * BAR_WIDTH as f64).round().max(0.0) as usize).min(BAR_WIDTH)
}

/// Amount rounded to two decimals, without float noise or trailing zeros.
fn amount(value: f64) -> String {
    format!("{}", (value * 100.0).round() / 100.0)
}

/// Render one bar as text: header, stacked cells, and per-segment legend.
pub fn render_bar(bar: &BarData) -> String {
    let geometry = layout(bar);
    let mut out = String::new();

    out.push_str(&format!(
        "{} ({}){:>width$}\n",
        bar.label,
        bar.unit,
        format!(
            "{:.0}{}  ({}{} vs {:.0}{})",
            geometry.total,
            bar.unit,
            diff_string(geometry.total, bar.target),
            bar.unit,
            bar.target,
            bar.unit
        ),
        width = (BAR_WIDTH + 2).saturating_sub(bar.label.len() + bar.unit.len() + 3)
    ));

    let mut row: Vec<char> = vec![' '; BAR_WIDTH];
    let mut filled = 0;
    for (i, position) in geometry.labels.iter().enumerate() {
        let start = cells(position.left);
        let end = cells(position.left + position.width).max(start);
        for cell in row.iter_mut().take(end).skip(start) {
            *cell = SEGMENT_FILLS[i % SEGMENT_FILLS.len()];
        }
        // Mark item edges only where each block is wide enough to stay visible
        if cells(position.item_width) >= 2 {
            for offset in position.item_offsets().skip(1) {
                let edge = cells(offset);
                if edge < end {
                    row[edge] = ITEM_BOUNDARY;
                }
            }
        }
        filled = end;
    }

    if geometry.show_target_line {
        let target = cells(geometry.target_fraction).min(BAR_WIDTH - 1);
        for cell in row.iter_mut().take(target).skip(filled) {
            *cell = '·';
        }
        row[target] = '|';
    }

    out.push('[');
    out.extend(row);
    out.push_str("]\n");

    for (i, seg) in bar.segments.iter().enumerate() {
        out.push_str(&format!(
            "  {} {} - {} x {} = {}{}\n",
            SEGMENT_FILLS[i % SEGMENT_FILLS.len()],
            seg.label,
            seg.item_count,
            amount(seg.value_per_item),
            amount(seg.total()),
            bar.unit
        ));
    }

    out
}

/// Display all bars with the session header.
pub fn display_bars(bars: &[BarData], rates: &RateInputs) {
    println!();
    println!(
        "=== Targets for {} ===",
        format_duration(rates.duration_minutes)
    );
    println!();

    for bar in bars {
        print!("{}", render_bar(bar));
        println!();
    }
}

/// Display catalog products with their per-serving amounts.
pub fn display_catalog(products: &[&Product], title: &str) {
    if products.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, products.len());
    println!();

    for product in products {
        let fluid = fluid_volume_milliliters(product);
        let fluid_str = if fluid > 0.0 {
            format!(", {} ml fluid", amount(fluid))
        } else {
            String::new()
        };
        println!(
            "  {}  [{}]\n      {}, {}g carbs, {} mg sodium{}",
            item_label(product),
            item_key(product),
            serving_size_string(product),
            amount(carbs_grams(product)),
            sodium_milligrams(product).round(),
            fluid_str
        );
    }

    println!();
}

/// Write bars, layout, rates, and targets as pretty JSON.
pub fn write_json<W: Write>(
    writer: W,
    bars: &[BarData],
    rates: &RateInputs,
    targets: &SessionTargets,
) -> Result<()> {
    let report = Report {
        rates,
        targets,
        bars: bars
            .iter()
            .map(|bar| BarReport {
                bar,
                layout: layout(bar),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

/// Write one CSV row per segment.
pub fn write_csv<W: Write>(writer: W, bars: &[BarData]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "nutrient",
        "unit",
        "target",
        "label",
        "value_per_item",
        "item_count",
        "total",
        "color",
    ])?;

    for bar in bars {
        for seg in &bar.segments {
            wtr.write_record([
                bar.label.clone(),
                bar.unit.clone(),
                format!("{:.1}", bar.target),
                seg.label.clone(),
                amount(seg.value_per_item),
                seg.item_count.to_string(),
                amount(seg.total()),
                seg.color.clone(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BarSegment, Nutrient};

    fn carbs_bar() -> BarData {
        BarData {
            segments: vec![BarSegment {
                label: "Maurten Gel 100".to_string(),
                value_per_item: 25.0,
                item_count: 2,
                color: "#ffffff".to_string(),
            }],
            ..BarData::new(Nutrient::Carbs, 100.0)
        }
    }

    #[test]
    fn test_render_bar_under_target() {
        let text = render_bar(&carbs_bar());
        assert!(text.starts_with("carbs (g)"));
        assert!(text.contains("50g  (-50g vs 100g)"));
        assert!(text.contains('|'));
        assert!(text.contains("Maurten Gel 100 - 2 x 25 = 50g"));
    }

    #[test]
    fn test_render_bar_marks_item_blocks() {
        let text = render_bar(&carbs_bar());
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row.matches(ITEM_BOUNDARY).count(), 1);

        let mut bar = carbs_bar();
        bar.segments[0].item_count = 4;
        let text = render_bar(&bar);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row.matches(ITEM_BOUNDARY).count(), 3);
    }

    #[test]
    fn test_amounts_hide_float_noise() {
        let bar = BarData {
            segments: vec![BarSegment {
                label: "Salty Mix".to_string(),
                value_per_item: 196.50000000000003,
                item_count: 2,
                color: "#ffffff".to_string(),
            }],
            ..BarData::new(Nutrient::Sodium, 1000.0)
        };
        let text = render_bar(&bar);
        assert!(text.contains("Salty Mix - 2 x 196.5 = 393mg"));

        let mut out = Vec::new();
        write_csv(&mut out, &[bar]).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.contains(",196.5,2,393,"));
    }

    #[test]
    fn test_render_bar_target_met() {
        let mut bar = carbs_bar();
        bar.segments[0].item_count = 4;
        let text = render_bar(&bar);
        assert!(text.contains("(+0g vs 100g)"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&mut out, &[carbs_bar()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("nutrient,unit,target"));
        assert_eq!(
            lines.next().unwrap(),
            "carbs,g,100.0,Maurten Gel 100,25,2,50,#ffffff"
        );
    }

    #[test]
    fn test_write_json() {
        let rates = RateInputs::default();
        let targets = SessionTargets::default();
        let mut out = Vec::new();
        write_json(&mut out, &[carbs_bar()], &rates, &targets).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["bars"][0]["label"], "carbs");
        assert_eq!(json["bars"][0]["segments"][0]["itemCount"], 2);
        assert_eq!(json["bars"][0]["layout"]["showTargetLine"], true);
        assert_eq!(json["rates"]["durationMinutes"], 360.0);
    }
}
