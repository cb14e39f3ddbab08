use std::path::PathBuf;

use thiserror::Error;

use crate::Hormone;

/// Failures while loading or writing the model config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to create config dir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejections from the strict input layer used by the CLI. The model itself
/// accepts any finite value.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{hormone} must be within 0-100, got {value}")]
    OutOfRange { hormone: Hormone, value: f64 },

    #[error("baseline body fat must be within 0-100, got {0}")]
    InvalidBaseline(f64),
}
