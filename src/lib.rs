pub mod config;
pub mod error;
pub mod model;
pub mod sampling;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::InputError;
use crate::model::{
    gauge, DistributionModel, DistributionResult, ImpactModel, ImpactResult, RegionGauge,
};

pub const NEUTRAL_LEVEL: f64 = 50.0;

pub const DEFAULT_BASELINE_PERCENT: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hormone {
    Insulin,
    Cortisol,
    Testosterone,
    Estrogen,
}

impl Hormone {
    pub const ALL: [Hormone; 4] = [
        Hormone::Insulin,
        Hormone::Cortisol,
        Hormone::Testosterone,
        Hormone::Estrogen,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Hormone::Insulin => "insulin",
            Hormone::Cortisol => "cortisol",
            Hormone::Testosterone => "testosterone",
            Hormone::Estrogen => "estrogen",
        }
    }
}

impl std::fmt::Display for Hormone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw hormone levels on the 0-100 scale.
///
/// A field left as `None` reads as [`NEUTRAL_LEVEL`]. A literal `0.0` is a
/// real low reading and is kept as such.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HormoneReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cortisol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testosterone: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estrogen: Option<f64>,
}

impl HormoneReading {
    pub fn new(insulin: f64, cortisol: f64, testosterone: f64, estrogen: f64) -> Self {
        Self {
            insulin: Some(insulin),
            cortisol: Some(cortisol),
            testosterone: Some(testosterone),
            estrogen: Some(estrogen),
        }
    }

    pub fn neutral() -> Self {
        Self::uniform(NEUTRAL_LEVEL)
    }

    pub fn uniform(level: f64) -> Self {
        Self::new(level, level, level, level)
    }

    pub fn with(mut self, hormone: Hormone, level: f64) -> Self {
        *self.slot_mut(hormone) = Some(level);
        self
    }

    pub fn raw(&self, hormone: Hormone) -> Option<f64> {
        match hormone {
            Hormone::Insulin => self.insulin,
            Hormone::Cortisol => self.cortisol,
            Hormone::Testosterone => self.testosterone,
            Hormone::Estrogen => self.estrogen,
        }
    }

    pub fn level(&self, hormone: Hormone) -> f64 {
        self.raw(hormone).unwrap_or(NEUTRAL_LEVEL)
    }

    pub fn normalized(&self) -> NormalizedLevels {
        NormalizedLevels {
            insulin: normalize(self.level(Hormone::Insulin)),
            cortisol: normalize(self.level(Hormone::Cortisol)),
            testosterone: normalize(self.level(Hormone::Testosterone)),
            estrogen: normalize(self.level(Hormone::Estrogen)),
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        for hormone in Hormone::ALL {
            if let Some(value) = self.raw(hormone) {
                if !(0.0..=100.0).contains(&value) {
                    return Err(InputError::OutOfRange { hormone, value });
                }
            }
        }
        Ok(())
    }

    fn slot_mut(&mut self, hormone: Hormone) -> &mut Option<f64> {
        match hormone {
            Hormone::Insulin => &mut self.insulin,
            Hormone::Cortisol => &mut self.cortisol,
            Hormone::Testosterone => &mut self.testosterone,
            Hormone::Estrogen => &mut self.estrogen,
        }
    }
}

// Out-of-range levels are not rejected; they land outside [-1, 1].
pub fn normalize(raw: f64) -> f64 {
    (raw - NEUTRAL_LEVEL) / NEUTRAL_LEVEL
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLevels {
    pub insulin: f64,
    pub cortisol: f64,
    pub testosterone: f64,
    pub estrogen: f64,
}

impl NormalizedLevels {
    pub fn get(&self, hormone: Hormone) -> f64 {
        match hormone {
            Hormone::Insulin => self.insulin,
            Hormone::Cortisol => self.cortisol,
            Hormone::Testosterone => self.testosterone,
            Hormone::Estrogen => self.estrogen,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Exact lookup; anything other than `"female"` falls back to male.
    pub fn parse(value: &str) -> Self {
        match value {
            "female" => Gender::Female,
            _ => Gender::Male,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Arms,
    Shoulders,
    Chest,
    Abdomen,
    Hips,
    Thighs,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Arms,
        Region::Shoulders,
        Region::Chest,
        Region::Abdomen,
        Region::Hips,
        Region::Thighs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::Arms => "arms",
            Region::Shoulders => "shoulders",
            Region::Chest => "chest",
            Region::Abdomen => "abdomen",
            Region::Hips => "hips",
            Region::Thighs => "thighs",
        }
    }

    pub fn is_derived(self) -> bool {
        matches!(self, Region::Shoulders)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionShares {
    pub arms: f64,
    pub shoulders: f64,
    pub chest: f64,
    pub abdomen: f64,
    pub hips: f64,
    pub thighs: f64,
}

impl RegionShares {
    pub fn from_fn(mut f: impl FnMut(Region) -> f64) -> Self {
        Self {
            arms: f(Region::Arms),
            shoulders: f(Region::Shoulders),
            chest: f(Region::Chest),
            abdomen: f(Region::Abdomen),
            hips: f(Region::Hips),
            thighs: f(Region::Thighs),
        }
    }

    pub fn get(&self, region: Region) -> f64 {
        match region {
            Region::Arms => self.arms,
            Region::Shoulders => self.shoulders,
            Region::Chest => self.chest,
            Region::Abdomen => self.abdomen,
            Region::Hips => self.hips,
            Region::Thighs => self.thighs,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, f64)> + '_ {
        Region::ALL.into_iter().map(move |region| (region, self.get(region)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, value)| value).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    pub hormones: HormoneReading,
    pub distribution: DistributionResult,
    pub impact: ImpactResult,
    pub gauges: Vec<RegionGauge>,
}

pub fn compute_distribution(hormones: &HormoneReading, gender: Gender) -> DistributionResult {
    DistributionModel::default().compute(hormones, gender)
}

pub fn compute_body_fat_impact(hormones: &HormoneReading, baseline_percent: f64) -> ImpactResult {
    ImpactModel::default().compute(hormones, baseline_percent)
}

pub fn estimate(
    hormones: &HormoneReading,
    gender: Gender,
    baseline_percent: f64,
    config: &ModelConfig,
) -> Estimate {
    let distribution_model = DistributionModel::new(config.distribution.to_policy());
    let impact_model = ImpactModel::default();

    let distribution = distribution_model.compute(hormones, gender);
    let impact = impact_model.compute(hormones, baseline_percent);
    let gauges = gauge(&distribution_model, &distribution);

    debug!(
        gender = gender.label(),
        abdomen = distribution.distribution.abdomen,
        delta_percent = impact.delta_percent,
        new_body_fat = impact.new_body_fat,
        "computed estimate"
    );

    Estimate {
        hormones: *hormones,
        distribution,
        impact,
        gauges,
    }
}

pub fn validate_baseline(baseline_percent: f64) -> Result<f64, InputError> {
    if (0.0..=100.0).contains(&baseline_percent) {
        Ok(baseline_percent)
    } else {
        Err(InputError::InvalidBaseline(baseline_percent))
    }
}

pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn format_signed(value: f64, digits: usize) -> String {
    format!("{:+.1$}", value, digits)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_scale_onto_signed_unit() {
        assert_eq!(normalize(50.0), 0.0);
        assert_eq!(normalize(0.0), -1.0);
        assert_eq!(normalize(100.0), 1.0);
        assert_eq!(normalize(150.0), 2.0);
    }

    #[test]
    fn literal_zero_is_not_treated_as_missing() {
        let reading = HormoneReading::default().with(Hormone::Estrogen, 0.0);
        assert_eq!(reading.level(Hormone::Estrogen), 0.0);
        assert_eq!(reading.level(Hormone::Insulin), NEUTRAL_LEVEL);
        assert_eq!(reading.normalized().estrogen, -1.0);
    }

    #[test]
    fn partial_json_reading_defaults_to_neutral() {
        let reading: HormoneReading =
            serde_json::from_str(r#"{"insulin": 80}"#).expect("valid reading");
        assert_eq!(reading.insulin, Some(80.0));
        assert_eq!(reading.level(Hormone::Cortisol), NEUTRAL_LEVEL);
    }

    #[test]
    fn format_signed_keeps_sign() {
        assert_eq!(format_signed(1.26, 1), "+1.3");
        assert_eq!(format_signed(-0.4, 1), "-0.4");
        assert_eq!(format_percent(39.4), "39.4%");
    }
}
