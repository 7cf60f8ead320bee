//! Benchmark datasets and their split vocabularies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::frames::FilenameFormat;

/// FBMS splits.
pub const FBMS_SPLITS: &[&str] = &["train", "test"];
/// DAVIS 2016 splits.
pub const DAVIS16_SPLITS: &[&str] = &["train", "val", "moving_val"];
/// DAVIS 2017 splits.
pub const DAVIS17_SPLITS: &[&str] = &["moving_val", "val", "test", "test-dev"];
/// YouTube-VOS splits.
pub const YTVOS_SPLITS: &[&str] = &["train", "val", "moving_train", "moving_val"];

/// A benchmark dataset section of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Fbms,
    Davis16,
    Davis17,
    Ytvos,
}

impl Dataset {
    /// All datasets, in document order.
    pub const ALL: [Dataset; 4] = [
        Dataset::Fbms,
        Dataset::Davis16,
        Dataset::Davis17,
        Dataset::Ytvos,
    ];

    /// Returns the top-level key of this dataset's section.
    pub fn key(self) -> &'static str {
        match self {
            Dataset::Fbms => "fbms",
            Dataset::Davis16 => "davis16",
            Dataset::Davis17 => "davis17",
            Dataset::Ytvos => "ytvos",
        }
    }

    /// Returns the fixed split vocabulary.
    pub fn allowed_splits(self) -> &'static [&'static str] {
        match self {
            Dataset::Fbms => FBMS_SPLITS,
            Dataset::Davis16 => DAVIS16_SPLITS,
            Dataset::Davis17 => DAVIS17_SPLITS,
            Dataset::Ytvos => YTVOS_SPLITS,
        }
    }

    /// Reports whether `split` belongs to this dataset's vocabulary.
    pub fn is_valid_split(self, split: &str) -> bool {
        self.allowed_splits().contains(&split)
    }

    /// Like [`Dataset::is_valid_split`], but returns an error naming the allowed set.
    pub fn check_split(self, split: &str) -> Result<()> {
        if self.is_valid_split(split) {
            return Ok(());
        }
        Err(ConfigError::UnknownSplit {
            dataset: self.key().to_string(),
            split: split.to_string(),
            allowed: self.allowed_splits().iter().map(|s| s.to_string()).collect(),
        })
    }

    /// How frame files of this dataset are named on disk.
    pub fn filename_format(self) -> FilenameFormat {
        match self {
            Dataset::Fbms => FilenameFormat::Fbms,
            Dataset::Davis16 | Dataset::Davis17 | Dataset::Ytvos => FilenameFormat::Frame,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dataset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Dataset::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownDataset(s.to_string()))
    }
}
