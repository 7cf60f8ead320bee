//! Tracking parameters handed to the external tracker.

use schemars::JsonSchema;
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};

use crate::validate::Issue;

/// Appearance cue used to break ties between candidate detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceFeature {
    /// Cosine distance between mask features.
    Mask,
    /// Chi-square distance between LAB color histograms.
    #[default]
    Histogram,
}

/// Thresholds for linking detections into tracks.
///
/// Every field is optional in the document; missing fields take the defaults
/// below. Thresholds must be finite: `.nan` and `.inf` fail to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct TrackingParams {
    /// Detection confidence needed to start a new track.
    #[serde(deserialize_with = "finite")]
    #[schemars(with = "f64")]
    pub score_init_min: f64,
    /// Detection confidence needed to extend an existing track.
    #[serde(deserialize_with = "finite")]
    #[schemars(with = "f64")]
    pub score_continue_min: f64,
    /// Frames a track may go without a matched detection.
    pub frames_skip_max: u32,
    /// Maximum center distance between matched detections, as a fraction of
    /// the image diagonal.
    #[serde(deserialize_with = "finite")]
    #[schemars(with = "f64")]
    pub spatial_dist_max: f64,
    /// Matched detections must have an area ratio within
    /// `[area_ratio, 1 / area_ratio]`. Zero disables the check.
    #[serde(deserialize_with = "finite")]
    #[schemars(with = "f64")]
    pub area_ratio: f64,
    /// Minimum mask IoU between matched detections.
    #[serde(deserialize_with = "finite")]
    #[schemars(with = "f64")]
    pub iou_min: f64,
    /// Gap between the best and second best IoU that assigns the best
    /// detection outright.
    #[serde(deserialize_with = "finite")]
    #[schemars(with = "f64")]
    pub iou_gap_min: f64,
    /// Match detections regardless of their class label.
    pub ignore_labels: bool,
    pub appearance_feature: AppearanceFeature,
    /// Gap between the best and second best appearance distance that
    /// assigns the best detection outright.
    #[serde(deserialize_with = "finite")]
    #[schemars(with = "f64")]
    pub appearance_gap: f64,
    /// Draw the spatial distance threshold when visualizing.
    pub draw_spatial_threshold: bool,
}

impl Default for TrackingParams {
    fn default() -> Self {
        Self {
            score_init_min: 0.9,
            score_continue_min: 0.7,
            frames_skip_max: 10,
            spatial_dist_max: 0.2,
            area_ratio: 0.5,
            iou_min: 0.1,
            iou_gap_min: 0.0,
            ignore_labels: false,
            appearance_feature: AppearanceFeature::Histogram,
            appearance_gap: 0.0,
            draw_spatial_threshold: false,
        }
    }
}

fn finite<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(de::Error::invalid_value(
            Unexpected::Float(value),
            &"a finite number",
        ))
    }
}

impl TrackingParams {
    /// Returns range violations, keyed under `prefix` (e.g. `tracker.params`).
    pub fn issues(&self, prefix: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut unit = |name: &str, value: f64| {
            if !(0.0..=1.0).contains(&value) {
                issues.push(Issue::InvalidValue {
                    key: format!("{prefix}.{name}"),
                    reason: format!("must be between 0 and 1, got {value}"),
                });
            }
        };

        unit("score_init_min", self.score_init_min);
        unit("score_continue_min", self.score_continue_min);
        unit("area_ratio", self.area_ratio);
        unit("iou_min", self.iou_min);
        unit("iou_gap_min", self.iou_gap_min);

        if self.spatial_dist_max.is_nan() || self.spatial_dist_max <= 0.0 {
            issues.push(Issue::InvalidValue {
                key: format!("{prefix}.spatial_dist_max"),
                reason: format!("must be positive, got {}", self.spatial_dist_max),
            });
        }
        if self.appearance_gap.is_nan() || self.appearance_gap < 0.0 {
            issues.push(Issue::InvalidValue {
                key: format!("{prefix}.appearance_gap"),
                reason: format!("must not be negative, got {}", self.appearance_gap),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TrackingParams::default().issues("tracker.params").is_empty());
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let params: TrackingParams =
            serde_yaml::from_str("score_init_min: 0.95\nappearance_feature: mask\n").unwrap();
        assert_eq!(params.score_init_min, 0.95);
        assert_eq!(params.appearance_feature, AppearanceFeature::Mask);
        assert_eq!(params.frames_skip_max, 10);
        assert_eq!(params.score_continue_min, 0.7);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<TrackingParams, _> = serde_yaml::from_str("score_min: 0.5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        for doc in ["score_init_min: .nan\n", "spatial_dist_max: .inf\n", "iou_min: -.inf\n"] {
            let result: Result<TrackingParams, _> = serde_yaml::from_str(doc);
            assert!(result.is_err(), "{doc}");
        }

        let params: TrackingParams = serde_yaml::from_str("appearance_gap: 2\n").unwrap();
        assert_eq!(params.appearance_gap, 2.0);
    }

    #[test]
    fn test_range_issues() {
        let params = TrackingParams {
            score_init_min: 1.5,
            iou_min: -0.1,
            spatial_dist_max: 0.0,
            appearance_gap: f64::NAN,
            ..Default::default()
        };
        let issues = params.issues("tracker.params");
        let keys: Vec<_> = issues.iter().map(|i| i.key().to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "tracker.params.score_init_min",
                "tracker.params.iou_min",
                "tracker.params.spatial_dist_max",
                "tracker.params.appearance_gap",
            ]
        );
    }
}
