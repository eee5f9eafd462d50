//! Facial proportion, angle and symmetry measurements.
//!
//! Every metric is derived from the 68 landmarks alone. Distances that feed
//! a symmetry delta are normalized by the inter-pupillary distance so the
//! values do not depend on how large the face is in the photo.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{
    angle, distance, distance_to_line, midpoint, projected_length, ratio, tilt_degrees,
};
use crate::landmarks::{self as lm, interpupillary_distance};
use crate::types::{LandmarkSet, Point};

/// Identifier of a named measurement.
///
/// The declaration order is the order metrics are produced in and breaks
/// ties wherever metrics are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    /// Brow-to-nose-base over nose-base-to-chin height.
    FacialThirds,
    /// Cheek width over upper face height.
    FacialWidthHeight,
    /// Jaw width over cheek width.
    BigonialBizygomatic,
    /// Nose width over nose height.
    NasalIndex,
    /// Lower lip thickness over upper lip thickness.
    LipFullness,
    /// Philtrum length over lip height.
    PhiltrumLip,
    /// Mean eye width over inter-pupillary distance.
    EyeWidthIpd,
    /// Mean tilt of the outer-to-inner eye corner line.
    CanthalTilt,
    /// Mean gonial angle of both sides of the jaw.
    JawAngle,
    JawSymmetry,
    EyebrowSymmetry,
    EyeSymmetry,
    MouthSymmetry,
}

impl MetricId {
    pub const ALL: [MetricId; 13] = [
        MetricId::FacialThirds,
        MetricId::FacialWidthHeight,
        MetricId::BigonialBizygomatic,
        MetricId::NasalIndex,
        MetricId::LipFullness,
        MetricId::PhiltrumLip,
        MetricId::EyeWidthIpd,
        MetricId::CanthalTilt,
        MetricId::JawAngle,
        MetricId::JawSymmetry,
        MetricId::EyebrowSymmetry,
        MetricId::EyeSymmetry,
        MetricId::MouthSymmetry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricId::FacialThirds => "facial_thirds",
            MetricId::FacialWidthHeight => "facial_width_height",
            MetricId::BigonialBizygomatic => "bigonial_bizygomatic",
            MetricId::NasalIndex => "nasal_index",
            MetricId::LipFullness => "lip_fullness",
            MetricId::PhiltrumLip => "philtrum_lip",
            MetricId::EyeWidthIpd => "eye_width_ipd",
            MetricId::CanthalTilt => "canthal_tilt",
            MetricId::JawAngle => "jaw_angle",
            MetricId::JawSymmetry => "jaw_symmetry",
            MetricId::EyebrowSymmetry => "eyebrow_symmetry",
            MetricId::EyeSymmetry => "eye_symmetry",
            MetricId::MouthSymmetry => "mouth_symmetry",
        }
    }

    /// Human-readable name used in summaries and reports.
    pub fn label(self) -> &'static str {
        match self {
            MetricId::FacialThirds => "facial thirds balance",
            MetricId::FacialWidthHeight => "facial width-to-height ratio",
            MetricId::BigonialBizygomatic => "jaw-to-cheek width ratio",
            MetricId::NasalIndex => "nasal index",
            MetricId::LipFullness => "lip fullness",
            MetricId::PhiltrumLip => "philtrum-to-lip ratio",
            MetricId::EyeWidthIpd => "eye width to IPD",
            MetricId::CanthalTilt => "canthal tilt",
            MetricId::JawAngle => "jaw angle",
            MetricId::JawSymmetry => "jaw symmetry",
            MetricId::EyebrowSymmetry => "eyebrow symmetry",
            MetricId::EyeSymmetry => "eye symmetry",
            MetricId::MouthSymmetry => "mouth symmetry",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            MetricId::CanthalTilt | MetricId::JawAngle => Unit::Degrees,
            _ => Unit::Ratio,
        }
    }

    /// Symmetry deltas, where 0 is a perfectly mirrored face.
    pub fn is_symmetry(self) -> bool {
        matches!(
            self,
            MetricId::JawSymmetry
                | MetricId::EyebrowSymmetry
                | MetricId::EyeSymmetry
                | MetricId::MouthSymmetry
        )
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Ratio,
    Degrees,
    /// Absolute image-space length. None of the built-in metrics report
    /// pixels (they are IPD-normalized), but serialized results and custom
    /// reports may carry it.
    Pixels,
}

/// One measurement and, once scored, how close it is to the reference ideal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: MetricId,
    /// Value straight from the geometry; signed angles may be negative.
    pub raw_value: f64,
    pub unit: Unit,
    /// 0-100; zero until the scoring engine fills it in.
    pub score: f64,
}

impl Metric {
    pub fn unscored(id: MetricId, raw_value: f64) -> Self {
        Self {
            id,
            raw_value,
            unit: id.unit(),
            score: 0.0,
        }
    }
}

/// Compute every metric in [`MetricId::ALL`] order.
///
/// Fails with a geometry error when a baseline the metric divides by has
/// zero length, which only happens for degenerate detections.
pub fn compute_metrics(landmarks: &LandmarkSet) -> Result<Vec<Metric>> {
    let ipd = interpupillary_distance(landmarks)?;
    let mut metrics = Vec::with_capacity(MetricId::ALL.len());
    for id in MetricId::ALL {
        let value = compute_metric(landmarks, id, ipd)?;
        debug!("metric {id} = {value:.4}");
        metrics.push(Metric::unscored(id, value));
    }
    Ok(metrics)
}

fn compute_metric(lms: &LandmarkSet, id: MetricId, ipd: f64) -> Result<f64> {
    let p = |i: usize| lms[i];
    let brow_mid = midpoint(p(lm::BROW_PEAK_RIGHT), p(lm::BROW_PEAK_LEFT));
    let cheek_width = distance(p(lm::CHEEK_RIGHT), p(lm::CHEEK_LEFT));

    match id {
        MetricId::FacialThirds => {
            // Heights run along the nose bridge so head roll does not shorten them.
            let axis = (p(lm::NASION), p(lm::NOSE_TIP));
            let middle = projected_length(brow_mid, p(lm::SUBNASALE), axis.0, axis.1)?;
            let lower = projected_length(p(lm::SUBNASALE), p(lm::CHIN), axis.0, axis.1)?;
            ratio(middle, lower)
        }
        MetricId::FacialWidthHeight => {
            ratio(cheek_width, distance(brow_mid, p(lm::UPPER_LIP_TOP)))
        }
        MetricId::BigonialBizygomatic => ratio(
            distance(p(lm::GONION_RIGHT), p(lm::GONION_LEFT)),
            cheek_width,
        ),
        MetricId::NasalIndex => ratio(
            distance(p(lm::ALA_RIGHT), p(lm::ALA_LEFT)),
            distance(p(lm::NASION), p(lm::SUBNASALE)),
        ),
        MetricId::LipFullness => ratio(
            distance(p(lm::LOWER_LIP_BOTTOM), p(lm::LOWER_LIP_INNER)),
            distance(p(lm::UPPER_LIP_TOP), p(lm::UPPER_LIP_INNER)),
        ),
        MetricId::PhiltrumLip => ratio(
            distance(p(lm::SUBNASALE), p(lm::UPPER_LIP_TOP)),
            distance(p(lm::UPPER_LIP_TOP), p(lm::LOWER_LIP_BOTTOM)),
        ),
        MetricId::EyeWidthIpd => {
            let right = distance(p(lm::EYE_OUTER_RIGHT), p(lm::EYE_INNER_RIGHT));
            let left = distance(p(lm::EYE_OUTER_LEFT), p(lm::EYE_INNER_LEFT));
            ratio((right + left) / 2.0, ipd)
        }
        MetricId::CanthalTilt => {
            let right = canthal_tilt(lms, lm::EYE_OUTER_RIGHT, lm::EYE_INNER_RIGHT)?;
            let left = canthal_tilt(lms, lm::EYE_OUTER_LEFT, lm::EYE_INNER_LEFT)?;
            Ok((right + left) / 2.0)
        }
        MetricId::JawAngle => {
            let right = angle(p(lm::JAW_TOP_RIGHT), p(lm::GONION_RIGHT), p(lm::CHIN))?;
            let left = angle(p(lm::JAW_TOP_LEFT), p(lm::GONION_LEFT), p(lm::CHIN))?;
            Ok((right + left) / 2.0)
        }
        MetricId::JawSymmetry => symmetry_delta(lms, &lm::JAW_PAIRS, ipd),
        MetricId::EyebrowSymmetry => symmetry_delta(lms, &lm::BROW_PAIRS, ipd),
        MetricId::EyeSymmetry => symmetry_delta(lms, &lm::EYE_PAIRS, ipd),
        MetricId::MouthSymmetry => symmetry_delta(lms, &lm::MOUTH_PAIRS, ipd),
    }
}

/// Tilt of one eye in degrees, positive when the outer corner sits higher
/// than the inner corner. Mirrored so both eyes use the same sign.
fn canthal_tilt(lms: &LandmarkSet, outer: usize, inner: usize) -> Result<f64> {
    let (o, i) = (lms[outer], lms[inner]);
    // Measure towards the inner corner with x flipped to point rightwards,
    // so an inner corner lower on screen (larger y) gives a positive angle.
    let inner_mirrored = Point::new(o.x + (i.x - o.x).abs(), i.y);
    tilt_degrees(o, inner_mirrored)
}

/// Mean absolute difference between the two sides' distances to the
/// midline (the line through the nose bridge), in units of IPD.
fn symmetry_delta(lms: &LandmarkSet, pairs: &[(usize, usize)], ipd: f64) -> Result<f64> {
    let (top, bottom) = (lms[lm::NASION], lms[lm::NOSE_TIP]);
    let mut total = 0.0;
    for &(right, left) in pairs {
        let dr = distance_to_line(lms[right], top, bottom)?;
        let dl = distance_to_line(lms[left], top, bottom)?;
        total += (dr - dl).abs();
    }
    ratio(total / pairs.len() as f64, ipd)
}
