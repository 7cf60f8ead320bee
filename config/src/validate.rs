//! Aggregated configuration validation.
//!
//! Validation never stops at the first problem: every check runs and the
//! resulting [`ValidationReport`] lists all issues at once, so a user can fix
//! a fresh configuration in one pass.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::checkpoint;
use crate::dataset::Dataset;
use crate::error::{ConfigError, Result};
use crate::paths;
use crate::placeholder::is_placeholder;
use crate::probe::{FsProbe, PathProbe};
use crate::schema::PipelineConfig;

/// One validation finding, keyed by its dotted document path.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    #[error("{key}: {} still needs to be set", display_value(.value))]
    Placeholder { key: String, value: String },

    #[error("{key}: cannot resolve path: {reason}")]
    UnresolvedPath { key: String, reason: String },

    #[error("{key}: {} does not exist", .path.display())]
    MissingPath { key: String, path: PathBuf },

    #[error("{key}: unknown split '{split}' (allowed: {})", .allowed.join(", "))]
    UnknownSplit {
        key: String,
        split: String,
        allowed: Vec<String>,
    },

    #[error("{key}: split '{split}' is listed more than once")]
    DuplicateSplit { key: String, split: String },

    #[error("{key}: checkpoint {} does not exist (available steps: {})", .path.display(), display_steps(.available))]
    MissingCheckpoint {
        key: String,
        path: PathBuf,
        available: Vec<u64>,
    },

    #[error("{key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl Issue {
    /// Returns the dotted key the issue refers to.
    pub fn key(&self) -> &str {
        match self {
            Issue::Placeholder { key, .. }
            | Issue::UnresolvedPath { key, .. }
            | Issue::MissingPath { key, .. }
            | Issue::UnknownSplit { key, .. }
            | Issue::DuplicateSplit { key, .. }
            | Issue::MissingCheckpoint { key, .. }
            | Issue::InvalidValue { key, .. } => key,
        }
    }
}

fn display_value(value: &str) -> String {
    if value.trim().is_empty() {
        "(empty)".to_string()
    } else {
        format!("'{value}'")
    }
}

fn display_steps(steps: &[u64]) -> String {
    if steps.is_empty() {
        return "none".to_string();
    }
    steps
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// All issues found in one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Converts a non-empty report into [`ConfigError::Invalid`].
    pub fn into_result(self) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(self))
        }
    }

    fn push(&mut self, issue: Issue) {
        debug!(%issue, "validation issue");
        self.issues.push(issue);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("configuration is valid");
        }
        let noun = if self.issues.len() == 1 { "issue" } else { "issues" };
        write!(f, "{} {noun} found:", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            write!(f, "\n  {}. {issue}", i + 1)?;
        }
        Ok(())
    }
}

/// Validation settings.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Directory relative paths are resolved against.
    pub base_dir: PathBuf,
    /// Check that input paths and checkpoints exist. When off, only
    /// document-level checks run.
    pub check_filesystem: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            check_filesystem: true,
        }
    }
}

impl ValidateOptions {
    /// Options that skip all filesystem checks.
    pub fn offline() -> Self {
        Self {
            check_filesystem: false,
            ..Default::default()
        }
    }
}

/// Validates the real filesystem view of a configuration.
pub fn validate(cfg: &PipelineConfig, options: ValidateOptions) -> Result<()> {
    Validator::new(&FsProbe, options).validate(cfg).into_result()
}

/// Runs every configuration check against a [`PathProbe`].
pub struct Validator<'a> {
    probe: &'a dyn PathProbe,
    options: ValidateOptions,
}

impl<'a> Validator<'a> {
    pub fn new(probe: &'a dyn PathProbe, options: ValidateOptions) -> Self {
        Self { probe, options }
    }

    /// Checks the whole document and returns every issue found.
    pub fn validate(&self, cfg: &PipelineConfig) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.check_general(cfg, &mut report);

        self.require_dir("flow.flownet2_dir", &cfg.flow.flownet2_dir, &mut report);

        for issue in cfg.tracker.effective_params().issues("tracker.params") {
            report.push(issue);
        }

        self.check_models(cfg, &mut report);

        for view in cfg.datasets() {
            let key = view.dataset.key();
            self.require_dir(&format!("{key}.root"), view.root, &mut report);
            self.check_splits(view.dataset, &format!("{key}.splits"), view.splits, &mut report);
            self.check_output_dir(&format!("{key}.output_dir"), view.output_dir, &mut report);
        }

        for (split, path) in &cfg.fbms.images_highres {
            let key = format!("fbms.images_highres.{split}");
            if !Dataset::Fbms.is_valid_split(split) {
                report.push(unknown_split(Dataset::Fbms, &key, split));
            }
            self.require_dir(&key, path, &mut report);
        }
        self.require_dir("fbms.eval_dir", &cfg.fbms.eval_dir, &mut report);

        info!(
            issues = report.len(),
            filesystem = self.options.check_filesystem,
            "validated configuration"
        );
        report
    }

    fn check_general(&self, cfg: &PipelineConfig, report: &mut ValidationReport) {
        if cfg.general.num_workers == 0 {
            report.push(Issue::InvalidValue {
                key: "general.num_workers".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        for gpu in &cfg.general.gpus {
            if !seen.insert(gpu) {
                report.push(Issue::InvalidValue {
                    key: "general.gpus".to_string(),
                    reason: format!("device {gpu} is listed more than once"),
                });
            }
        }
    }

    fn check_models(&self, cfg: &PipelineConfig, report: &mut ValidationReport) {
        for (variant, entry) in &cfg.model {
            let Some(dir) = self.require_dir(&format!("model.{variant}.dir"), &entry.dir, report)
            else {
                continue;
            };
            if !self.options.check_filesystem {
                continue;
            }

            let path = checkpoint::checkpoint_path(&dir, entry.step);
            if self.probe.exists(&path) {
                continue;
            }
            let available = checkpoint::list_steps(self.probe, &dir).unwrap_or_default();
            report.push(Issue::MissingCheckpoint {
                key: format!("model.{variant}.step"),
                path,
                available,
            });
        }
    }

    fn check_splits(
        &self,
        dataset: Dataset,
        key: &str,
        splits: &[String],
        report: &mut ValidationReport,
    ) {
        let mut seen = BTreeSet::new();
        for split in splits {
            if !dataset.is_valid_split(split) {
                report.push(unknown_split(dataset, key, split));
            } else if !seen.insert(split.as_str()) {
                report.push(Issue::DuplicateSplit {
                    key: key.to_string(),
                    split: split.clone(),
                });
            }
        }
    }

    /// Output directories only need to be set and resolvable; the consumer
    /// creates them.
    fn check_output_dir(&self, key: &str, raw: &Path, report: &mut ValidationReport) {
        self.resolve(key, raw, report);
    }

    /// Checks an input directory and returns its resolved path when usable.
    fn require_dir(&self, key: &str, raw: &Path, report: &mut ValidationReport) -> Option<PathBuf> {
        let resolved = self.resolve(key, raw, report)?;
        if !self.options.check_filesystem {
            return Some(resolved);
        }

        debug!(key, path = %resolved.display(), "checking path");
        if self.probe.is_dir(&resolved) {
            Some(resolved)
        } else {
            report.push(Issue::MissingPath {
                key: key.to_string(),
                path: resolved,
            });
            None
        }
    }

    fn resolve(&self, key: &str, raw: &Path, report: &mut ValidationReport) -> Option<PathBuf> {
        let text = raw.to_string_lossy();
        if is_placeholder(&text) {
            report.push(Issue::Placeholder {
                key: key.to_string(),
                value: text.into_owned(),
            });
            return None;
        }

        let expanded = match paths::expand(&text) {
            Ok(expanded) => expanded,
            Err(err) => {
                report.push(Issue::UnresolvedPath {
                    key: key.to_string(),
                    reason: err.to_string(),
                });
                return None;
            }
        };
        // Variables may expand to a placeholder too.
        if is_placeholder(&expanded) {
            report.push(Issue::Placeholder {
                key: key.to_string(),
                value: expanded,
            });
            return None;
        }

        let expanded = PathBuf::from(expanded);
        if expanded.is_absolute() {
            Some(expanded)
        } else {
            Some(self.options.base_dir.join(expanded))
        }
    }
}

fn unknown_split(dataset: Dataset, key: &str, split: &str) -> Issue {
    Issue::UnknownSplit {
        key: key.to_string(),
        split: split.to_string(),
        allowed: dataset.allowed_splits().iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let report = ValidationReport {
            issues: vec![
                Issue::Placeholder {
                    key: "flow.flownet2_dir".to_string(),
                    value: "/path/to/flownet2".to_string(),
                },
                Issue::MissingCheckpoint {
                    key: "model.joint.step".to_string(),
                    path: PathBuf::from("/m/checkpoints/model_step1.pth"),
                    available: vec![4999, 9999],
                },
            ],
        };

        let text = report.to_string();
        assert!(text.starts_with("2 issues found:"));
        assert!(text.contains("1. flow.flownet2_dir: '/path/to/flownet2' still needs to be set"));
        assert!(text.contains("2. model.joint.step: checkpoint /m/checkpoints/model_step1.pth"));
        assert!(text.contains("available steps: 4999, 9999"));
    }

    #[test]
    fn test_report_serializes_with_kind() {
        let report = ValidationReport {
            issues: vec![Issue::DuplicateSplit {
                key: "ytvos.splits".to_string(),
                split: "moving_val".to_string(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["issues"][0]["kind"], "duplicate_split");
        assert_eq!(json["issues"][0]["split"], "moving_val");
    }

    #[test]
    fn test_empty_value_display() {
        let issue = Issue::Placeholder {
            key: "davis16.root".to_string(),
            value: String::new(),
        };
        assert_eq!(issue.to_string(), "davis16.root: (empty) still needs to be set");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationReport::default().into_result().is_ok());
        let report = ValidationReport {
            issues: vec![Issue::InvalidValue {
                key: "general.num_workers".to_string(),
                reason: "must be at least 1".to_string(),
            }],
        };
        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("general.num_workers: must be at least 1"));
    }
}
