//! Frame-number extraction from frame file names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// How a frame number is encoded in a frame file's stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilenameFormat {
    /// The stem is the frame number (`00042`).
    #[default]
    #[serde(rename = "frame")]
    Frame,
    /// The frame number follows the last underscore (`bear_00042`).
    #[serde(rename = "sequence_frame")]
    SequenceFrame,
    /// The frame number follows the last dash (`bear-00042`).
    #[serde(rename = "sequence-frame")]
    SequenceDashFrame,
    /// FBMS naming: the trailing digits of the stem (`marple7_400`, `tennis000`).
    #[serde(rename = "fbms")]
    Fbms,
}

impl FilenameFormat {
    pub const ALL: [FilenameFormat; 4] = [
        FilenameFormat::Frame,
        FilenameFormat::SequenceFrame,
        FilenameFormat::SequenceDashFrame,
        FilenameFormat::Fbms,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilenameFormat::Frame => "frame",
            FilenameFormat::SequenceFrame => "sequence_frame",
            FilenameFormat::SequenceDashFrame => "sequence-frame",
            FilenameFormat::Fbms => "fbms",
        }
    }

    /// Extracts the frame number from a file stem (no extension).
    pub fn frame_number(self, stem: &str) -> Result<u64> {
        let digits = match self {
            FilenameFormat::Frame => stem,
            FilenameFormat::SequenceFrame => stem.rsplit('_').next().unwrap_or(stem),
            FilenameFormat::SequenceDashFrame => stem.rsplit('-').next().unwrap_or(stem),
            FilenameFormat::Fbms => {
                let start = stem
                    .char_indices()
                    .rev()
                    .take_while(|(_, c)| c.is_ascii_digit())
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(stem.len());
                &stem[start..]
            }
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.name_error(stem));
        }
        digits.parse().map_err(|_| self.name_error(stem))
    }

    fn name_error(self, stem: &str) -> ConfigError {
        ConfigError::FrameName {
            stem: stem.to_string(),
            format: self.as_str().to_string(),
        }
    }
}

impl fmt::Display for FilenameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilenameFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        FilenameFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownFilenameFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame() {
        assert_eq!(FilenameFormat::Frame.frame_number("00042").unwrap(), 42);
        assert!(FilenameFormat::Frame.frame_number("bear_00042").is_err());
    }

    #[test]
    fn test_sequence_frame() {
        let f = FilenameFormat::SequenceFrame;
        assert_eq!(f.frame_number("bear_00042").unwrap(), 42);
        assert_eq!(f.frame_number("car_roundabout_7").unwrap(), 7);
        assert_eq!(f.frame_number("15").unwrap(), 15);
        assert!(f.frame_number("bear-00042").is_err());
    }

    #[test]
    fn test_sequence_dash_frame() {
        let f = FilenameFormat::SequenceDashFrame;
        assert_eq!(f.frame_number("bear-00042").unwrap(), 42);
        assert!(f.frame_number("bear-").is_err());
    }

    #[test]
    fn test_fbms() {
        let f = FilenameFormat::Fbms;
        assert_eq!(f.frame_number("marple7_400").unwrap(), 400);
        assert_eq!(f.frame_number("tennis000").unwrap(), 0);
        assert_eq!(f.frame_number("cars10_0021").unwrap(), 21);

        let err = f.frame_number("tennis").unwrap_err();
        assert!(matches!(err, ConfigError::FrameName { .. }));
        assert!(err.to_string().contains("fbms"));
    }

    #[test]
    fn test_parse_format() {
        for format in FilenameFormat::ALL {
            assert_eq!(format.as_str().parse::<FilenameFormat>().unwrap(), format);
        }
        assert!("frames".parse::<FilenameFormat>().is_err());
    }
}
