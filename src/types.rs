use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of points in the iBUG 68-point landmark convention.
pub const LANDMARK_COUNT: usize = 68;

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// A detected face as exactly 68 landmark points.
///
/// Indices follow the iBUG layout (see [`crate::landmarks`]). The only way
/// to build one is through [`LandmarkSet::new`] or [`TryFrom`], both of which
/// reject any other point count, so downstream code can index freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(Error::InvalidLandmarkSet {
                expected: LANDMARK_COUNT,
                found: points.len(),
            });
        }
        if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::DegenerateGeometry(format!(
                "landmark {idx} has a non-finite coordinate"
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Points over an index range, e.g. one eye contour.
    pub fn region(&self, range: std::ops::RangeInclusive<usize>) -> &[Point] {
        &self.points[range]
    }

    /// Returns a new set with `f` applied to every point.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(usize, Point) -> Point,
    {
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| f(i, *p))
            .collect();
        Self { points }
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}
