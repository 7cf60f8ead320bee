//! Error types for configuration loading and validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationReport;

/// Errors produced while loading, querying or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("unknown dataset '{0}' (expected one of: fbms, davis16, davis17, ytvos)")]
    UnknownDataset(String),

    #[error(
        "unknown model variant '{0}' (expected one of: joint, joint_no_ytvos, appearance, motion)"
    )]
    UnknownVariant(String),

    #[error("split '{split}' is not valid for {dataset} (allowed: {})", .allowed.join(", "))]
    UnknownSplit {
        dataset: String,
        split: String,
        allowed: Vec<String>,
    },

    #[error("unknown filename format '{0}' (expected one of: frame, sequence_frame, sequence-frame, fbms)")]
    UnknownFilenameFormat(String),

    #[error("cannot parse a frame number from '{stem}' using the {format} format")]
    FrameName { stem: String, format: String },

    #[error("no configuration file found (tried: {})", display_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    #[error("invalid configuration:\n{0}")]
    Invalid(ValidationReport),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
