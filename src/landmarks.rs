//! Index layout of the iBUG 68-point landmark convention.
//!
//! "Right" and "left" are the subject's own sides, so the right eye appears
//! on the left of a non-mirrored photo.

use std::ops::RangeInclusive;

use crate::error::Result;
use crate::geometry::{centroid, distance};
use crate::types::{LandmarkSet, Point};

pub const JAW: RangeInclusive<usize> = 0..=16;
pub const RIGHT_BROW: RangeInclusive<usize> = 17..=21;
pub const LEFT_BROW: RangeInclusive<usize> = 22..=26;
pub const NOSE_BRIDGE: RangeInclusive<usize> = 27..=30;
pub const NOSE_BASE: RangeInclusive<usize> = 31..=35;
pub const RIGHT_EYE: RangeInclusive<usize> = 36..=41;
pub const LEFT_EYE: RangeInclusive<usize> = 42..=47;
pub const OUTER_LIP: RangeInclusive<usize> = 48..=59;
pub const INNER_LIP: RangeInclusive<usize> = 60..=67;

pub const CHEEK_RIGHT: usize = 1;
pub const GONION_RIGHT: usize = 3;
pub const CHIN: usize = 8;
pub const GONION_LEFT: usize = 13;
pub const CHEEK_LEFT: usize = 15;
pub const JAW_TOP_RIGHT: usize = 0;
pub const JAW_TOP_LEFT: usize = 16;

pub const BROW_PEAK_RIGHT: usize = 19;
pub const BROW_PEAK_LEFT: usize = 24;

pub const NASION: usize = 27;
pub const NOSE_TIP: usize = 30;
pub const ALA_RIGHT: usize = 31;
pub const SUBNASALE: usize = 33;
pub const ALA_LEFT: usize = 35;

pub const EYE_OUTER_RIGHT: usize = 36;
pub const EYE_INNER_RIGHT: usize = 39;
pub const EYE_INNER_LEFT: usize = 42;
pub const EYE_OUTER_LEFT: usize = 45;

pub const MOUTH_CORNER_RIGHT: usize = 48;
pub const UPPER_LIP_TOP: usize = 51;
pub const MOUTH_CORNER_LEFT: usize = 54;
pub const LOWER_LIP_BOTTOM: usize = 57;
pub const INNER_CORNER_RIGHT: usize = 60;
pub const UPPER_LIP_INNER: usize = 62;
pub const INNER_CORNER_LEFT: usize = 64;
pub const LOWER_LIP_INNER: usize = 66;

/// Mirror pairs along the jaw contour, excluding the chin.
pub const JAW_PAIRS: [(usize, usize); 8] = [
    (0, 16),
    (1, 15),
    (2, 14),
    (3, 13),
    (4, 12),
    (5, 11),
    (6, 10),
    (7, 9),
];

pub const BROW_PAIRS: [(usize, usize); 5] = [(17, 26), (18, 25), (19, 24), (20, 23), (21, 22)];

pub const EYE_PAIRS: [(usize, usize); 6] = [
    (36, 45),
    (37, 44),
    (38, 43),
    (39, 42),
    (40, 47),
    (41, 46),
];

pub const MOUTH_PAIRS: [(usize, usize); 2] = [
    (MOUTH_CORNER_RIGHT, MOUTH_CORNER_LEFT),
    (INNER_CORNER_RIGHT, INNER_CORNER_LEFT),
];

/// Centers of the right and left eye, each the mean of its six contour points.
pub fn eye_centers(landmarks: &LandmarkSet) -> Result<(Point, Point)> {
    let right = centroid(landmarks.region(RIGHT_EYE))?;
    let left = centroid(landmarks.region(LEFT_EYE))?;
    Ok((right, left))
}

/// Distance between the two eye centers in pixels.
pub fn interpupillary_distance(landmarks: &LandmarkSet) -> Result<f64> {
    let (right, left) = eye_centers(landmarks)?;
    Ok(distance(right, left))
}

/// Face size used when scaling the normalized mean shape to pixels.
const REFERENCE_SCALE: f64 = 400.0;
const REFERENCE_OFFSET: Point = Point::new(100.0, 50.0);

/// A frontal, mirror-symmetric 68-point face in pixel coordinates.
///
/// Built from an approximate iBUG mean shape scaled to a 400px face box at
/// (100, 50); the midline sits at x = 300 and the inter-pupillary distance is
/// 152px. Handy as a demo input and as a base for synthetic test faces.
pub fn reference_face() -> LandmarkSet {
    let points = MEAN_SHAPE
        .iter()
        .map(|&(x, y)| REFERENCE_OFFSET + Point::new(x, y) * REFERENCE_SCALE)
        .collect();
    match LandmarkSet::new(points) {
        Ok(set) => set,
        Err(_) => unreachable!("MEAN_SHAPE holds exactly 68 finite points"),
    }
}

/// Approximate iBUG 68-point mean shape in normalized [0,1] coordinates.
const MEAN_SHAPE: [(f64, f64); 68] = [
    // Jaw line (0-16)
    (0.10, 0.35),
    (0.11, 0.45),
    (0.12, 0.55),
    (0.14, 0.65),
    (0.18, 0.73),
    (0.24, 0.80),
    (0.32, 0.85),
    (0.41, 0.88),
    (0.50, 0.89), // Chin center
    (0.59, 0.88),
    (0.68, 0.85),
    (0.76, 0.80),
    (0.82, 0.73),
    (0.86, 0.65),
    (0.88, 0.55),
    (0.89, 0.45),
    (0.90, 0.35),
    // Right eyebrow (17-21)
    (0.20, 0.26),
    (0.25, 0.22),
    (0.32, 0.21),
    (0.38, 0.23),
    (0.43, 0.27),
    // Left eyebrow (22-26)
    (0.57, 0.27),
    (0.62, 0.23),
    (0.68, 0.21),
    (0.75, 0.22),
    (0.80, 0.26),
    // Nose bridge (27-30)
    (0.50, 0.32),
    (0.50, 0.40),
    (0.50, 0.48),
    (0.50, 0.55),
    // Nose bottom (31-35)
    (0.40, 0.58),
    (0.45, 0.60),
    (0.50, 0.62),
    (0.55, 0.60),
    (0.60, 0.58),
    // Right eye (36-41)
    (0.24, 0.32),
    (0.28, 0.29),
    (0.34, 0.29),
    (0.38, 0.33),
    (0.34, 0.35),
    (0.28, 0.35),
    // Left eye (42-47)
    (0.62, 0.33),
    (0.66, 0.29),
    (0.72, 0.29),
    (0.76, 0.32),
    (0.72, 0.35),
    (0.66, 0.35),
    // Outer lip (48-59)
    (0.32, 0.72),
    (0.38, 0.68),
    (0.44, 0.66),
    (0.50, 0.67),
    (0.56, 0.66),
    (0.62, 0.68),
    (0.68, 0.72),
    (0.62, 0.78),
    (0.56, 0.80),
    (0.50, 0.81),
    (0.44, 0.80),
    (0.38, 0.78),
    // Inner lip (60-67)
    (0.36, 0.72),
    (0.44, 0.70),
    (0.50, 0.70),
    (0.56, 0.70),
    (0.64, 0.72),
    (0.56, 0.74),
    (0.50, 0.75),
    (0.44, 0.74),
];
