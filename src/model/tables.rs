use serde::{Deserialize, Serialize};

use crate::{Gender, Hormone, NormalizedLevels, Region};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseWeights {
    pub abdomen: f64,
    pub hips: f64,
    pub thighs: f64,
    pub arms: f64,
    pub chest: f64,
}

impl BaseWeights {
    pub fn map(&self, mut f: impl FnMut(Region, f64) -> f64) -> Self {
        Self {
            abdomen: f(Region::Abdomen, self.abdomen),
            hips: f(Region::Hips, self.hips),
            thighs: f(Region::Thighs, self.thighs),
            arms: f(Region::Arms, self.arms),
            chest: f(Region::Chest, self.chest),
        }
    }
}

pub const MALE_BASE: BaseWeights = BaseWeights {
    abdomen: 40.0,
    hips: 10.0,
    thighs: 15.0,
    arms: 15.0,
    chest: 20.0,
};

pub const FEMALE_BASE: BaseWeights = BaseWeights {
    abdomen: 20.0,
    hips: 32.0,
    thighs: 28.0,
    arms: 10.0,
    chest: 10.0,
};

pub fn base_weights(gender: Gender) -> &'static BaseWeights {
    match gender {
        Gender::Male => &MALE_BASE,
        Gender::Female => &FEMALE_BASE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionEffects {
    pub insulin: f64,
    pub cortisol: f64,
    pub testosterone: f64,
    pub estrogen: f64,
}

impl RegionEffects {
    pub const NONE: RegionEffects = RegionEffects {
        insulin: 0.0,
        cortisol: 0.0,
        testosterone: 0.0,
        estrogen: 0.0,
    };

    pub fn coefficient(&self, hormone: Hormone) -> f64 {
        match hormone {
            Hormone::Insulin => self.insulin,
            Hormone::Cortisol => self.cortisol,
            Hormone::Testosterone => self.testosterone,
            Hormone::Estrogen => self.estrogen,
        }
    }

    pub fn offset(&self, levels: &NormalizedLevels) -> f64 {
        Hormone::ALL
            .iter()
            .map(|hormone| levels.get(*hormone) * self.coefficient(*hormone))
            .sum()
    }
}

const ABDOMEN_EFFECTS: RegionEffects = RegionEffects {
    insulin: 1.3,
    cortisol: 1.0,
    testosterone: -0.7,
    estrogen: -0.2,
};

const HIPS_EFFECTS: RegionEffects = RegionEffects {
    insulin: -0.2,
    cortisol: -0.25,
    testosterone: -0.4,
    estrogen: 0.9,
};

const THIGHS_EFFECTS: RegionEffects = RegionEffects {
    insulin: -0.2,
    cortisol: -0.2,
    testosterone: -0.35,
    estrogen: 0.8,
};

const ARMS_EFFECTS: RegionEffects = RegionEffects {
    insulin: -0.1,
    cortisol: 0.1,
    testosterone: 0.0,
    estrogen: 0.0,
};

const CHEST_EFFECTS: RegionEffects = RegionEffects {
    insulin: 0.35,
    cortisol: 0.2,
    testosterone: -0.25,
    estrogen: 0.0,
};

// Shoulders are derived from arms and chest and carry no effects.
pub fn region_effects(region: Region) -> &'static RegionEffects {
    match region {
        Region::Abdomen => &ABDOMEN_EFFECTS,
        Region::Hips => &HIPS_EFFECTS,
        Region::Thighs => &THIGHS_EFFECTS,
        Region::Arms => &ARMS_EFFECTS,
        Region::Chest => &CHEST_EFFECTS,
        Region::Shoulders => &RegionEffects::NONE,
    }
}
