use anyhow::Result;
use serde::Serialize;

use fat_distribution_sim::model::{DistributionResult, ImpactResult, RegionGauge, RegionRange};
use fat_distribution_sim::{
    format_float, format_percent, format_signed, Estimate, Gender, Hormone, HormoneReading,
    Region,
};

const BAR_WIDTH: usize = 20;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_distribution(result: &DistributionResult) {
    println!("Fat distribution ({})", result.gender.label());
    for region in Region::ALL {
        println!(
            "  {:<11} {:>6}  ({})",
            region_label(region),
            format_percent(result.distribution.get(region)),
            format_signed(result.delta.get(region), 1)
        );
    }
}

pub fn print_impact(result: &ImpactResult, baseline: f64) {
    println!(
        "Body fat: {} -> {} ({} pts/month)",
        format_percent(baseline),
        format_percent(result.new_body_fat),
        format_signed(result.delta_percent, 2)
    );
}

pub fn print_estimates(estimates: &[Estimate], baseline: f64) {
    if let Some(first) = estimates.first() {
        println!("Hormones: {}", describe_reading(&first.hormones));
        print_impact(&first.impact, baseline);
    }

    for estimate in estimates {
        println!();
        println!("{}", gender_heading(estimate.distribution.gender));
        for gauge in &estimate.gauges {
            print_gauge(gauge);
        }
    }
}

pub fn print_ranges(gender: Gender, ranges: &[RegionRange]) {
    println!("Region ranges ({})", gender.label());
    for range in ranges {
        println!(
            "  {:<11} {:>6} .. {:>6} .. {:>6}",
            region_label(range.region),
            format_float(range.min, 1),
            format_float(range.neutral, 1),
            format_float(range.max, 1)
        );
    }
}

fn print_gauge(gauge: &RegionGauge) {
    println!(
        "  {:<11} [{}] {:>6} ({})",
        region_label(gauge.region),
        render_bar(gauge.fill, BAR_WIDTH),
        format_percent(gauge.value),
        format_signed(gauge.delta, 1)
    );
}

fn render_bar(fill: f64, width: usize) -> String {
    let filled = ((fill.max(0.0).min(1.0)) * width as f64).round() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(width - filled));
    bar
}

fn region_label(region: Region) -> String {
    if region.is_derived() {
        format!("{}*", region.label())
    } else {
        region.label().to_string()
    }
}

fn gender_heading(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
    }
}

fn describe_reading(reading: &HormoneReading) -> String {
    Hormone::ALL
        .iter()
        .map(|hormone| format!("{} {}", hormone.label(), format_float(reading.level(*hormone), 0)))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_width_is_constant() {
        for fill in [0.0, 0.25, 0.5, 0.99, 1.0, 3.0] {
            assert_eq!(render_bar(fill, BAR_WIDTH).len(), BAR_WIDTH);
        }
        assert_eq!(render_bar(0.5, 10), "#####-----");
    }

    #[test]
    fn derived_regions_are_marked() {
        assert_eq!(region_label(Region::Shoulders), "shoulders*");
        assert_eq!(region_label(Region::Hips), "hips");
    }
}
