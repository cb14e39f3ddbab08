use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::model::SensitivityPolicy;
use crate::DEFAULT_BASELINE_PERCENT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,
    pub min_factor: f64,
    pub max_factor: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            policy: "clamped".to_string(),
            sensitivity: None,
            min_factor: SensitivityPolicy::MIN_FACTOR,
            max_factor: SensitivityPolicy::MAX_FACTOR,
        }
    }
}

impl DistributionConfig {
    pub fn to_policy(&self) -> SensitivityPolicy {
        match self.policy.trim().to_lowercase().as_str() {
            "linear" => SensitivityPolicy::Linear {
                scale: self.sensitivity.unwrap_or(SensitivityPolicy::LINEAR_SCALE),
            },
            _ => {
                let (min_factor, max_factor) = if self.min_factor <= self.max_factor {
                    (self.min_factor, self.max_factor)
                } else {
                    (self.max_factor, self.min_factor)
                };
                SensitivityPolicy::Clamped {
                    scale: self.sensitivity.unwrap_or(SensitivityPolicy::CLAMPED_SCALE),
                    min_factor,
                    max_factor,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    pub baseline_percent: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            baseline_percent: DEFAULT_BASELINE_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub distribution: DistributionConfig,
    pub impact: ImpactConfig,
}

impl ModelConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::read(path)?,
            _ => ModelConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "wrote model config");
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(policy) = lookup("FAT_SIM_POLICY") {
            if !policy.trim().is_empty() {
                self.distribution.policy = policy;
            }
        }
        if let Some(sensitivity) = lookup("FAT_SIM_SENSITIVITY") {
            match sensitivity.trim().parse::<f64>() {
                Ok(value) => self.distribution.sensitivity = Some(value),
                Err(_) => warn!(value = %sensitivity, "ignoring FAT_SIM_SENSITIVITY"),
            }
        }
        if let Some(baseline) = lookup("FAT_SIM_BASELINE") {
            match baseline.trim().parse::<f64>() {
                Ok(value) => self.impact.baseline_percent = value,
                Err(_) => warn!(value = %baseline, "ignoring FAT_SIM_BASELINE"),
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("FAT_SIM_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/model.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_policy_is_clamped() {
        let policy = ModelConfig::default().distribution.to_policy();
        assert_eq!(policy, SensitivityPolicy::clamped());
    }

    #[test]
    fn linear_policy_uses_linear_scale() {
        let config = DistributionConfig {
            policy: "Linear".to_string(),
            ..DistributionConfig::default()
        };
        assert_eq!(config.to_policy(), SensitivityPolicy::linear());
    }

    #[test]
    fn swapped_factor_bounds_are_reordered() {
        let config = DistributionConfig {
            min_factor: 1.2,
            max_factor: 0.8,
            ..DistributionConfig::default()
        };
        match config.to_policy() {
            SensitivityPolicy::Clamped {
                min_factor,
                max_factor,
                ..
            } => {
                assert_eq!(min_factor, 0.8);
                assert_eq!(max_factor, 1.2);
            }
            other => panic!("unexpected policy {:?}", other),
        }
    }

    #[test]
    fn overrides_apply_and_bad_numbers_are_ignored() {
        let mut config = ModelConfig::default();
        config.apply_overrides(lookup_from(&[
            ("FAT_SIM_POLICY", "linear"),
            ("FAT_SIM_SENSITIVITY", "0.2"),
            ("FAT_SIM_BASELINE", "not-a-number"),
        ]));
        assert_eq!(config.distribution.policy, "linear");
        assert_eq!(config.distribution.sensitivity, Some(0.2));
        assert_eq!(config.impact.baseline_percent, DEFAULT_BASELINE_PERCENT);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: ModelConfig = toml::from_str("[impact]\nbaseline_percent = 30.0\n")
            .expect("valid toml");
        assert_eq!(config.impact.baseline_percent, 30.0);
        assert_eq!(config.distribution, DistributionConfig::default());
    }
}
