pub mod distribution;
pub mod gauge;
pub mod impact;
pub mod tables;

pub use distribution::{derive_regions, DistributionModel, DistributionResult, SensitivityPolicy};
pub use gauge::{fill_fraction, gauge, region_ranges, RegionGauge, RegionRange};
pub use impact::{ImpactCoefficients, ImpactModel, ImpactResult};
pub use tables::{base_weights, region_effects, BaseWeights, RegionEffects};
