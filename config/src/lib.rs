//! Pipeline configuration for vostrack.
//!
//! This crate owns the configuration document consumed by the segmentation
//! and tracking pipeline: model checkpoints, flow estimation, worker/GPU
//! counts and the FBMS, DAVIS16, DAVIS17 and YouTube-VOS dataset descriptors.
//!
//! - [`PipelineConfig`]: the typed document
//! - [`load`]: YAML/JSON parsing, serialization and discovery
//! - [`Validator`]: aggregated validation against the filesystem
//!
//! # Example
//!
//! ```rust
//! use vostrack_config::{load, Dataset, Format, ModelVariant};
//!
//! let cfg = load::from_str(vostrack_config::TEMPLATE, Format::Yaml).unwrap();
//! assert_eq!(cfg.model(ModelVariant::Joint).unwrap().step, 4999);
//! assert!(Dataset::Davis17.is_valid_split("test-dev"));
//! ```

pub mod checkpoint;
pub mod dataset;
pub mod error;
pub mod frames;
pub mod load;
pub mod paths;
pub mod placeholder;
pub mod probe;
pub mod schema;
pub mod template;
pub mod tracking;
pub mod validate;

pub use dataset::Dataset;
pub use error::{ConfigError, Result};
pub use frames::FilenameFormat;
pub use load::Format;
pub use probe::{FsProbe, MemoryProbe, PathProbe};
pub use schema::{
    DatasetSection, DatasetView, FbmsSection, Flow, General, ModelEntry, ModelVariant,
    PipelineConfig, Tracker,
};
pub use template::TEMPLATE;
pub use tracking::{AppearanceFeature, TrackingParams};
pub use validate::{Issue, ValidateOptions, ValidationReport, Validator};
