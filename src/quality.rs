//! Capture quality: head roll, a yaw proxy and face size.
//!
//! The landmark set is 2D only, so yaw is approximated by how far the nose
//! tip sits from the midpoint between the outer eye corners, measured along
//! the eye line so that roll alone does not register as yaw. The report is
//! advisory; scoring runs regardless of the verdict.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::QualityThresholds;
use crate::error::Result;
use crate::geometry::{distance, midpoint, ratio, tilt_degrees};
use crate::landmarks::{self as lm, interpupillary_distance};
use crate::types::LandmarkSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityIssue {
    /// Head is tilted sideways beyond the roll limit.
    ExcessiveRoll,
    /// Head is turned away from the camera beyond the yaw limit.
    ExcessiveYaw,
    /// Face is too small in frame for reliable measurement.
    FaceTooSmall,
}

impl QualityIssue {
    pub fn description(self) -> &'static str {
        match self {
            QualityIssue::ExcessiveRoll => "head is tilted; keep the eyes level",
            QualityIssue::ExcessiveYaw => "head is turned; face the camera directly",
            QualityIssue::FaceTooSmall => "face is too small; move closer to the camera",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Tilt of the outer-eye-corner line, clockwise positive.
    pub roll_degrees: f64,
    /// Nose tip offset from the eye midpoint along the eye line, in units of
    /// IPD. Signed, positive toward the subject's left.
    pub yaw_proxy: f64,
    pub interpupillary_distance_pixels: f64,
    pub acceptable: bool,
    pub issues: Vec<QualityIssue>,
}

/// Assess how reliable a capture is for proportion measurements.
pub fn assess_quality(
    landmarks: &LandmarkSet,
    thresholds: &QualityThresholds,
) -> Result<QualityReport> {
    let outer_right = landmarks[lm::EYE_OUTER_RIGHT];
    let outer_left = landmarks[lm::EYE_OUTER_LEFT];

    let roll_degrees = tilt_degrees(outer_right, outer_left)?;
    let ipd = interpupillary_distance(landmarks)?;
    let eye_mid = midpoint(outer_right, outer_left);
    let eye_line = outer_left - outer_right;
    let offset = landmarks[lm::NOSE_TIP] - eye_mid;
    let along = ratio(
        offset.x * eye_line.x + offset.y * eye_line.y,
        distance(outer_right, outer_left),
    )?;
    let yaw_proxy = ratio(along, ipd)?;

    let mut issues = Vec::new();
    if roll_degrees.abs() > thresholds.max_roll_degrees {
        issues.push(QualityIssue::ExcessiveRoll);
    }
    if yaw_proxy.abs() > thresholds.max_yaw_proxy {
        issues.push(QualityIssue::ExcessiveYaw);
    }
    if ipd < thresholds.min_interpupillary_pixels {
        issues.push(QualityIssue::FaceTooSmall);
    }

    let acceptable = issues.is_empty();
    if !acceptable {
        warn!(
            "capture quality insufficient: roll={roll_degrees:.1}deg yaw={yaw_proxy:.3} ipd={ipd:.1}px issues={issues:?}"
        );
    }

    Ok(QualityReport {
        roll_degrees,
        yaw_proxy,
        interpupillary_distance_pixels: ipd,
        acceptable,
        issues,
    })
}
