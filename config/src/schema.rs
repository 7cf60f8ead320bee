//! The configuration document.
//!
//! Key names and nesting match the manifest consumed by the tracking and
//! evaluation scripts:
//!
//! ```yaml
//! general: { num_workers: 8, gpus: [0, 1] }
//! flow: { flownet2_dir: /opt/flownet2 }
//! tracker: { visualize: false }
//! model:
//!   joint: { dir: release/model/joint/, step: 4999 }
//! fbms: { root: ..., images_highres: { test: ... }, splits: [test], output_dir: ..., eval_dir: ... }
//! davis16: { root: ..., splits: [moving_val], output_dir: ... }
//! davis17: { root: ..., splits: [moving_val], output_dir: ... }
//! ytvos: { root: ..., splits: [moving_val], output_dir: ... }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};

use crate::checkpoint;
use crate::dataset::Dataset;
use crate::error::ConfigError;
use crate::tracking::TrackingParams;

/// The whole pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub general: General,
    pub flow: Flow,
    pub tracker: Tracker,
    /// Model checkpoints by variant.
    pub model: BTreeMap<ModelVariant, ModelEntry>,
    pub fbms: FbmsSection,
    pub davis16: DatasetSection,
    pub davis17: DatasetSection,
    pub ytvos: DatasetSection,

    /// File the document was loaded from (not serialized).
    #[serde(skip)]
    source: Option<PathBuf>,
}

/// Process-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct General {
    /// Worker processes for the consumer's pool. Must be at least 1.
    pub num_workers: u32,
    /// GPU device indices, in assignment order.
    pub gpus: Vec<u32>,
}

/// Optical flow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Flow {
    /// FlowNet2 installation directory.
    pub flownet2_dir: PathBuf,
}

/// Tracker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Tracker {
    #[serde(deserialize_with = "yaml11_bool")]
    #[schemars(with = "bool")]
    pub visualize: bool,
    /// Tracking thresholds; defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<TrackingParams>,
}

impl Tracker {
    /// Returns the configured tracking parameters, or the defaults.
    pub fn effective_params(&self) -> TrackingParams {
        self.params.clone().unwrap_or_default()
    }
}

/// A trained model variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Two-stream model trained on all datasets.
    Joint,
    /// Two-stream model trained without YouTube-VOS.
    JointNoYtvos,
    /// Appearance stream only.
    Appearance,
    /// Motion stream only.
    Motion,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::Joint,
        ModelVariant::JointNoYtvos,
        ModelVariant::Appearance,
        ModelVariant::Motion,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ModelVariant::Joint => "joint",
            ModelVariant::JointNoYtvos => "joint_no_ytvos",
            ModelVariant::Appearance => "appearance",
            ModelVariant::Motion => "motion",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModelVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelVariant::ALL
            .into_iter()
            .find(|v| v.key() == s)
            .ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }
}

/// A model checkpoint location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    /// Training output directory.
    pub dir: PathBuf,
    /// Checkpoint step under `dir`.
    pub step: u64,
}

impl ModelEntry {
    /// Returns `<dir>/checkpoints/model_step<step>.pth`.
    pub fn checkpoint_path(&self) -> PathBuf {
        checkpoint::checkpoint_path(&self.dir, self.step)
    }
}

/// Descriptor shared by DAVIS16, DAVIS17 and YouTube-VOS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DatasetSection {
    /// Dataset root directory.
    pub root: PathBuf,
    /// Splits to run, from the dataset's vocabulary.
    pub splits: Vec<String>,
    /// Where results for this dataset are written.
    pub output_dir: PathBuf,
}

/// FBMS descriptor; carries high-resolution image roots and the evaluation tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FbmsSection {
    pub root: PathBuf,
    /// High-resolution frame directories by split.
    pub images_highres: BTreeMap<String, PathBuf>,
    pub splits: Vec<String>,
    pub output_dir: PathBuf,
    /// FBMS evaluation tool directory.
    pub eval_dir: PathBuf,
}

/// Uniform read-only view over any dataset section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetView<'a> {
    pub dataset: Dataset,
    pub root: &'a Path,
    pub splits: &'a [String],
    pub output_dir: &'a Path,
}

impl DatasetView<'_> {
    /// Returns `<output_dir>/<split>`.
    pub fn split_output_dir(&self, split: &str) -> PathBuf {
        self.output_dir.join(split)
    }
}

impl DatasetSection {
    fn view(&self, dataset: Dataset) -> DatasetView<'_> {
        DatasetView {
            dataset,
            root: &self.root,
            splits: &self.splits,
            output_dir: &self.output_dir,
        }
    }
}

impl PipelineConfig {
    /// Returns the file this document was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub(crate) fn set_source(&mut self, path: PathBuf) {
        self.source = Some(path);
    }

    /// Returns the descriptor of one dataset.
    pub fn dataset(&self, dataset: Dataset) -> DatasetView<'_> {
        match dataset {
            Dataset::Fbms => DatasetView {
                dataset,
                root: &self.fbms.root,
                splits: &self.fbms.splits,
                output_dir: &self.fbms.output_dir,
            },
            Dataset::Davis16 => self.davis16.view(dataset),
            Dataset::Davis17 => self.davis17.view(dataset),
            Dataset::Ytvos => self.ytvos.view(dataset),
        }
    }

    /// Returns all dataset descriptors in document order.
    pub fn datasets(&self) -> [DatasetView<'_>; 4] {
        Dataset::ALL.map(|d| self.dataset(d))
    }

    /// Returns a model entry, if that variant is configured.
    pub fn model(&self, variant: ModelVariant) -> Option<&ModelEntry> {
        self.model.get(&variant)
    }
}

/// Equality covers the document only, not where it was loaded from.
impl PartialEq for PipelineConfig {
    fn eq(&self, other: &Self) -> bool {
        self.general == other.general
            && self.flow == other.flow
            && self.tracker == other.tracker
            && self.model == other.model
            && self.fbms == other.fbms
            && self.davis16 == other.davis16
            && self.davis17 == other.davis17
            && self.ytvos == other.ytvos
    }
}

/// Accepts YAML 1.2 booleans plus the YAML 1.1 spellings (`True`, `no`, ...).
fn yaml11_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.as_str() {
            "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Ok(true),
            "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => Ok(false),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"a boolean",
            )),
        },
    }
}
