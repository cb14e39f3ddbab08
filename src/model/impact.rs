use serde::{Deserialize, Serialize};

use crate::{round_to, Hormone, HormoneReading, NormalizedLevels};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactCoefficients {
    pub insulin: f64,
    pub cortisol: f64,
    pub testosterone: f64,
    pub estrogen: f64,
    pub scale: f64,
    pub max_monthly_change: f64,
    pub min_body_fat: f64,
    pub max_body_fat: f64,
}

impl Default for ImpactCoefficients {
    fn default() -> Self {
        Self {
            insulin: 1.0,
            cortisol: 0.6,
            testosterone: -0.7,
            estrogen: 0.1,
            scale: 1.8,
            max_monthly_change: 6.0,
            min_body_fat: 1.0,
            max_body_fat: 60.0,
        }
    }
}

impl ImpactCoefficients {
    pub fn coefficient(&self, hormone: Hormone) -> f64 {
        match hormone {
            Hormone::Insulin => self.insulin,
            Hormone::Cortisol => self.cortisol,
            Hormone::Testosterone => self.testosterone,
            Hormone::Estrogen => self.estrogen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub delta_percent: f64,
    pub new_body_fat: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ImpactModel {
    coefficients: ImpactCoefficients,
}

impl ImpactModel {
    pub fn new(coefficients: ImpactCoefficients) -> Self {
        Self { coefficients }
    }

    pub fn compute(&self, hormones: &HormoneReading, baseline_percent: f64) -> ImpactResult {
        let delta = self.monthly_change(&hormones.normalized());
        let new_body_fat = (baseline_percent + delta)
            .max(self.coefficients.min_body_fat)
            .min(self.coefficients.max_body_fat);

        ImpactResult {
            delta_percent: round_to(delta, 2),
            new_body_fat: round_to(new_body_fat, 2),
        }
    }

    pub fn monthly_change(&self, levels: &NormalizedLevels) -> f64 {
        let weighted: f64 = Hormone::ALL
            .iter()
            .map(|hormone| levels.get(*hormone) * self.coefficients.coefficient(*hormone))
            .sum();
        let limit = self.coefficients.max_monthly_change;
        (weighted * self.coefficients.scale).max(-limit).min(limit)
    }
}
