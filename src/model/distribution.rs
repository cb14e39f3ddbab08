use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::tables::{base_weights, region_effects, BaseWeights};
use crate::{Gender, HormoneReading, NormalizedLevels, Region, RegionShares};

pub const WEIGHT_FLOOR: f64 = 0.1;

// 100.0% in tenths.
const TOTAL_TENTHS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum SensitivityPolicy {
    Linear { scale: f64 },
    Clamped {
        scale: f64,
        min_factor: f64,
        max_factor: f64,
    },
}

impl SensitivityPolicy {
    pub const LINEAR_SCALE: f64 = 0.12;
    pub const CLAMPED_SCALE: f64 = 0.35;
    pub const MIN_FACTOR: f64 = 0.65;
    pub const MAX_FACTOR: f64 = 1.35;

    pub fn linear() -> Self {
        SensitivityPolicy::Linear {
            scale: Self::LINEAR_SCALE,
        }
    }

    pub fn clamped() -> Self {
        SensitivityPolicy::Clamped {
            scale: Self::CLAMPED_SCALE,
            min_factor: Self::MIN_FACTOR,
            max_factor: Self::MAX_FACTOR,
        }
    }

    pub fn factor(&self, offset: f64) -> f64 {
        match *self {
            SensitivityPolicy::Linear { scale } => 1.0 + offset * scale,
            SensitivityPolicy::Clamped {
                scale,
                min_factor,
                max_factor,
            } => (1.0 + offset * scale).max(min_factor).min(max_factor),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensitivityPolicy::Linear { .. } => "linear",
            SensitivityPolicy::Clamped { .. } => "clamped",
        }
    }
}

impl Default for SensitivityPolicy {
    fn default() -> Self {
        SensitivityPolicy::clamped()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub distribution: RegionShares,
    pub delta: RegionShares,
    pub gender: Gender,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionModel {
    policy: SensitivityPolicy,
}

impl DistributionModel {
    pub fn new(policy: SensitivityPolicy) -> Self {
        Self { policy }
    }

    pub fn compute(&self, hormones: &HormoneReading, gender: Gender) -> DistributionResult {
        let current = self.tenths(&hormones.normalized(), gender);
        let neutral = self.tenths(&HormoneReading::neutral().normalized(), gender);

        DistributionResult {
            distribution: RegionShares::from_fn(|region| current.percent(region)),
            delta: RegionShares::from_fn(|region| {
                (current.get(region) - neutral.get(region)) as f64 / 10.0
            }),
            gender,
        }
    }

    pub fn neutral_distribution(&self, gender: Gender) -> RegionShares {
        self.compute(&HormoneReading::neutral(), gender).distribution
    }

    pub fn weighted(&self, levels: &NormalizedLevels, gender: Gender) -> BaseWeights {
        base_weights(gender).map(|region, base| {
            let offset = region_effects(region).offset(levels);
            (base * self.policy.factor(offset)).max(WEIGHT_FLOOR)
        })
    }

    fn tenths(&self, levels: &NormalizedLevels, gender: Gender) -> RegionTenths {
        let derived = derive_regions(&self.weighted(levels, gender));
        apportion_tenths(&derived)
    }
}

// arms, shoulders and chest read the pre-derivation arms and chest weights.
pub fn derive_regions(weights: &BaseWeights) -> RegionShares {
    let arms = weights.arms;
    let chest = weights.chest;

    RegionShares {
        arms: (arms * 0.9 + chest * 0.05).max(WEIGHT_FLOOR),
        shoulders: (chest * 0.35 + arms * 0.15).max(WEIGHT_FLOOR),
        chest: (chest * 0.6 + arms * 0.05).max(WEIGHT_FLOOR),
        abdomen: weights.abdomen.max(WEIGHT_FLOOR),
        hips: weights.hips.max(WEIGHT_FLOOR),
        thighs: weights.thighs.max(WEIGHT_FLOOR),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegionTenths([i64; 6]);

impl RegionTenths {
    fn get(&self, region: Region) -> i64 {
        self.0[region_index(region)]
    }

    fn percent(&self, region: Region) -> f64 {
        self.get(region) as f64 / 10.0
    }
}

fn region_index(region: Region) -> usize {
    Region::ALL
        .iter()
        .position(|candidate| *candidate == region)
        .unwrap_or(0)
}

// Rounding each region to one decimal on its own can leave the total up to
// 0.3 away from 100. Largest-remainder apportionment keeps it at exactly 1000
// tenths, so deltas between two distributions also total zero.
fn apportion_tenths(weights: &RegionShares) -> RegionTenths {
    let total = weights.total();
    let exact: Vec<f64> = Region::ALL
        .iter()
        .map(|region| {
            if total > 0.0 {
                weights.get(*region) / total * TOTAL_TENTHS as f64
            } else {
                0.0
            }
        })
        .collect();

    let mut tenths = [0i64; 6];
    for (slot, value) in tenths.iter_mut().zip(exact.iter()) {
        *slot = if value.is_finite() { value.floor() as i64 } else { 0 };
    }

    let assigned: i64 = tenths.iter().sum();
    let remaining = (TOTAL_TENTHS - assigned).max(0) as usize;

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let rem_a = exact[a] - exact[a].floor();
        let rem_b = exact[b] - exact[b].floor();
        rem_b
            .partial_cmp(&rem_a)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    for &idx in order.iter().take(remaining) {
        tenths[idx] += 1;
    }

    RegionTenths(tenths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tables::MALE_BASE;

    #[test]
    fn clamped_policy_bounds_factor() {
        let policy = SensitivityPolicy::clamped();
        assert!((policy.factor(10.0) - 1.35).abs() < 1e-12);
        assert!((policy.factor(-10.0) - 0.65).abs() < 1e-12);
        assert!((policy.factor(0.5) - 1.175).abs() < 1e-12);
    }

    #[test]
    fn linear_policy_is_unbounded() {
        let policy = SensitivityPolicy::linear();
        assert!((policy.factor(10.0) - 2.2).abs() < 1e-12);
        assert!((policy.factor(-1.0) - 0.88).abs() < 1e-12);
    }

    #[test]
    fn derive_reads_pre_derivation_arms_and_chest() {
        let derived = derive_regions(&MALE_BASE);
        assert!((derived.arms - 14.5).abs() < 1e-9);
        assert!((derived.shoulders - 9.25).abs() < 1e-9);
        assert!((derived.chest - 12.75).abs() < 1e-9);
        assert_eq!(derived.abdomen, 40.0);
        assert_eq!(derived.hips, 10.0);
        assert_eq!(derived.thighs, 15.0);
    }

    #[test]
    fn derive_floors_tiny_weights() {
        let tiny = MALE_BASE.map(|_, _| 0.0);
        let derived = derive_regions(&tiny);
        for (_, value) in derived.iter() {
            assert_eq!(value, WEIGHT_FLOOR);
        }
    }

    #[test]
    fn apportion_totals_exactly_one_thousand_tenths() {
        let weights = RegionShares {
            arms: 1.0,
            shoulders: 1.0,
            chest: 1.0,
            abdomen: 1.0,
            hips: 1.0,
            thighs: 1.0,
        };
        let tenths = apportion_tenths(&weights);
        assert_eq!(tenths.0.iter().sum::<i64>(), TOTAL_TENTHS);
        // 166.67 each: the first four by index take the leftover tenths.
        assert_eq!(tenths.0, [167, 167, 167, 167, 166, 166]);
    }

    #[test]
    fn apportion_avoids_per_region_rounding_drift() {
        let derived = derive_regions(&MALE_BASE);
        let naive: f64 = derived
            .iter()
            .map(|(_, value)| (value / derived.total() * 1000.0).round() / 10.0)
            .sum();
        assert!((naive - 100.1).abs() < 1e-9);

        let tenths = apportion_tenths(&derived);
        assert_eq!(tenths.0, [143, 91, 126, 394, 98, 148]);
        assert_eq!(tenths.0.iter().sum::<i64>(), TOTAL_TENTHS);
    }

    #[test]
    fn weighted_applies_floor() {
        let model = DistributionModel::new(SensitivityPolicy::Linear { scale: 10.0 });
        let levels = HormoneReading::new(0.0, 0.0, 100.0, 100.0).normalized();
        let weights = model.weighted(&levels, Gender::Male);
        assert_eq!(weights.abdomen, WEIGHT_FLOOR);
    }
}
