use serde::{Deserialize, Serialize};

use crate::model::{DistributionModel, DistributionResult};
use crate::{Gender, HormoneReading, Region};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRange {
    pub region: Region,
    pub min: f64,
    pub neutral: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionGauge {
    pub region: Region,
    pub value: f64,
    pub delta: f64,
    pub range: RegionRange,
    pub fill: f64,
}

pub fn region_ranges(model: &DistributionModel, gender: Gender) -> Vec<RegionRange> {
    let low = model.compute(&HormoneReading::uniform(0.0), gender).distribution;
    let high = model.compute(&HormoneReading::uniform(100.0), gender).distribution;
    let neutral = model.neutral_distribution(gender);

    Region::ALL
        .iter()
        .map(|region| {
            let a = low.get(*region);
            let b = high.get(*region);
            RegionRange {
                region: *region,
                min: a.min(b),
                neutral: neutral.get(*region),
                max: a.max(b),
            }
        })
        .collect()
}

// Neutral always maps to 0.5. A zero-width span is treated as width 1.
pub fn fill_fraction(value: f64, range: &RegionRange) -> f64 {
    let fill = if value < range.neutral {
        let span = non_zero(range.neutral - range.min);
        0.25 + 0.25 * ((value - range.min) / span)
    } else if value > range.neutral {
        let span = non_zero(range.max - range.neutral);
        0.5 + 0.5 * ((value - range.neutral) / span)
    } else {
        0.5
    };
    fill.max(0.0).min(1.0)
}

pub fn gauge(model: &DistributionModel, result: &DistributionResult) -> Vec<RegionGauge> {
    region_ranges(model, result.gender)
        .into_iter()
        .map(|range| {
            let value = result.distribution.get(range.region);
            RegionGauge {
                region: range.region,
                value,
                delta: result.delta.get(range.region),
                fill: fill_fraction(value, &range),
                range,
            }
        })
        .collect()
}

fn non_zero(span: f64) -> f64 {
    if span == 0.0 {
        1.0
    } else {
        span
    }
}
