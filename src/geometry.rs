//! Primitive computations over landmark points.
//!
//! Everything here is pure. Functions that can hit a zero-length baseline
//! return an error instead of producing `NaN` or infinity.

use crate::error::{Error, Result};
use crate::types::Point;

/// Euclidean distance.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle at `vertex` between the rays towards `a` and `b`, in degrees [0, 180].
pub fn angle(a: Point, vertex: Point, b: Point) -> Result<f64> {
    let v1 = a - vertex;
    let v2 = b - vertex;
    let n1 = (v1.x * v1.x + v1.y * v1.y).sqrt();
    let n2 = (v2.x * v2.x + v2.y * v2.y).sqrt();
    if n1 == 0.0 || n2 == 0.0 {
        return Err(Error::DegenerateGeometry(format!(
            "angle vertex ({}, {}) coincides with an endpoint",
            vertex.x, vertex.y
        )));
    }
    // Rounding can push the cosine just outside [-1, 1].
    let cos = ((v1.x * v2.x + v1.y * v2.y) / (n1 * n2)).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// `numerator / denominator`, failing on a zero or non-finite denominator.
pub fn ratio(numerator: f64, denominator: f64) -> Result<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(Error::DivisionByZero(format!(
            "{numerator} / {denominator}"
        )));
    }
    Ok(numerator / denominator)
}

/// Mean position of a group of points.
pub fn centroid(points: &[Point]) -> Result<Point> {
    if points.is_empty() {
        return Err(Error::DegenerateGeometry(
            "centroid of an empty point set".into(),
        ));
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Point::zero(), |acc, p| acc + *p);
    Ok(sum * (1.0 / n))
}

/// Signed angle of the line `from -> to` relative to the horizontal, in degrees.
///
/// Image space has y pointing down, so a positive value is a clockwise
/// rotation on screen.
pub fn tilt_degrees(from: Point, to: Point) -> Result<f64> {
    let d = to - from;
    if d.x == 0.0 && d.y == 0.0 {
        return Err(Error::DegenerateGeometry(
            "tilt of a zero-length line".into(),
        ));
    }
    Ok(d.y.atan2(d.x).to_degrees())
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
pub fn distance_to_line(p: Point, a: Point, b: Point) -> Result<f64> {
    let len = distance(a, b);
    if len == 0.0 {
        return Err(Error::DegenerateGeometry(
            "reference line has zero length".into(),
        ));
    }
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    Ok(cross.abs() / len)
}

/// Length of the projection of `a -> b` onto the direction `axis_from -> axis_to`.
pub fn projected_length(a: Point, b: Point, axis_from: Point, axis_to: Point) -> Result<f64> {
    let axis = axis_to - axis_from;
    let len = distance(axis_from, axis_to);
    if len == 0.0 {
        return Err(Error::DegenerateGeometry("projection axis has zero length".into()));
    }
    let v = b - a;
    Ok(((v.x * axis.x + v.y * axis.y) / len).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_is_euclidean() {
        let d = distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < EPS);
        assert_eq!(distance(Point::new(2.0, 2.0), Point::new(2.0, 2.0)), 0.0);
    }

    #[test]
    fn angle_right_and_straight() {
        let a = angle(Point::new(1.0, 0.0), Point::zero(), Point::new(0.0, 1.0)).unwrap();
        assert!((a - 90.0).abs() < EPS);

        let a = angle(Point::new(-1.0, 0.0), Point::zero(), Point::new(1.0, 0.0)).unwrap();
        assert!((a - 180.0).abs() < EPS);

        let a = angle(Point::new(2.0, 0.0), Point::zero(), Point::new(5.0, 0.0)).unwrap();
        assert!(a.abs() < EPS);
    }

    #[test]
    fn angle_rejects_coincident_vertex() {
        let v = Point::new(1.0, 1.0);
        assert!(matches!(
            angle(v, v, Point::new(3.0, 3.0)),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(
            angle(Point::new(3.0, 3.0), v, v),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn ratio_guards_zero() {
        assert!((ratio(1.0, 4.0).unwrap() - 0.25).abs() < EPS);
        assert!(matches!(ratio(1.0, 0.0), Err(Error::DivisionByZero(_))));
        assert!(matches!(
            ratio(1.0, f64::NAN),
            Err(Error::DivisionByZero(_))
        ));
    }

    #[test]
    fn midpoint_and_centroid() {
        let m = midpoint(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        assert_eq!(m, Point::new(2.0, 1.0));

        let c = centroid(&[
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(c, Point::new(2.0, 2.0));
        assert!(centroid(&[]).is_err());
    }

    #[test]
    fn tilt_is_clockwise_positive() {
        let level = tilt_degrees(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        assert!(level.abs() < EPS);

        // Right end lower on screen (larger y) is a clockwise tilt.
        let cw = tilt_degrees(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
        assert!((cw - 45.0).abs() < EPS);

        let ccw = tilt_degrees(Point::new(0.0, 0.0), Point::new(10.0, -10.0)).unwrap();
        assert!((ccw + 45.0).abs() < EPS);

        assert!(tilt_degrees(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn line_distance_and_projection() {
        let a = Point::new(5.0, 0.0);
        let b = Point::new(5.0, 10.0);
        let d = distance_to_line(Point::new(2.0, 7.0), a, b).unwrap();
        assert!((d - 3.0).abs() < EPS);
        assert!(distance_to_line(Point::zero(), a, a).is_err());

        let h = projected_length(Point::new(0.0, 2.0), Point::new(9.0, 6.0), a, b).unwrap();
        assert!((h - 4.0).abs() < EPS);
    }
}
