//! Math types used by the engine
//!
//! The engine works in a right-handed 2D plane with `f64` precision. Points
//! and vectors are thin aliases over nalgebra so callers get the full
//! nalgebra API for free.

pub use nalgebra::{Isometry2, Point2, Vector2};

/// A position in the plane
pub type Point = Point2<f64>;

/// A displacement in the plane
pub type Vec2 = Vector2<f64>;

/// Tolerance used by geometric comparisons, in world units
pub const EPSILON: f64 = 1e-3;

/// Z component of the cross product of two planar vectors
///
/// Positive when `b` lies counter-clockwise of `a`.
#[inline]
pub fn cross(a: &Vec2, b: &Vec2) -> f64 {
    a.perp(b)
}

/// Orientation of `c` relative to the directed line `a -> b`
#[inline]
pub fn orient(a: &Point, b: &Point, c: &Point) -> f64 {
    cross(&(b - a), &(c - a))
}

/// Whether two scalars are within [`EPSILON`] of each other
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Whether two points are within [`EPSILON`] of each other
#[inline]
pub fn points_coincide(a: &Point, b: &Point) -> bool {
    nalgebra::distance(a, b) < EPSILON
}

/// Shortest distance from `point` to the segment `a -> b`
pub fn distance_to_segment(point: &Point, a: &Point, b: &Point) -> f64 {
    let ab = b - a;
    let length_squared = ab.norm_squared();
    if length_squared <= f64::EPSILON {
        return nalgebra::distance(point, a);
    }
    let t = ((point - a).dot(&ab) / length_squared).clamp(0.0, 1.0);
    nalgebra::distance(point, &(a + ab * t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orient_sign() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        assert!(orient(&a, &b, &Point::new(0.5, 1.0)) > 0.0);
        assert!(orient(&a, &b, &Point::new(0.5, -1.0)) < 0.0);
        assert_relative_eq!(orient(&a, &b, &Point::new(3.0, 0.0)), 0.0);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_relative_eq!(distance_to_segment(&Point::new(5.0, 3.0), &a, &b), 3.0);
        assert_relative_eq!(distance_to_segment(&Point::new(-4.0, 3.0), &a, &b), 5.0);
        assert_relative_eq!(distance_to_segment(&Point::new(2.0, 2.0), &a, &a), 8.0_f64.sqrt());
    }
}
