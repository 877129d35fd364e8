use std::f64::consts::TAU;

use nalgebra::{Isometry2, Rotation2};

use crate::ecs::Component;
use crate::foundation::math::{Point, Vec2, EPSILON};

/// Smallest area treated as a real polygon
pub(crate) const AREA_EPSILON: f64 = EPSILON * EPSILON;

/// World placement of an entity: position plus heading in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Heading in radians
    pub a: f64,
}

impl Component for Pose {}

impl Pose {
    /// Create a pose
    pub fn new(x: f64, y: f64, a: f64) -> Self {
        Self { x, y, a }
    }

    /// Position part of the pose
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Unit vector along the heading
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.a.cos(), self.a.sin())
    }

    /// Rigid transform taking local coordinates into the world
    pub fn isometry(&self) -> Isometry2<f64> {
        Isometry2::new(Vec2::new(self.x, self.y), self.a)
    }

    /// Distance between the positions of two poses
    pub fn distance_to(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.position(), &other.position())
    }
}

/// Ordered polygon vertices in local coordinates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    /// Ring vertices, not closed
    pub vertices: Vec<Point>,
}

impl Component for Shape {}

impl Shape {
    /// Create a shape from vertices
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Create a shape from coordinate pairs
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the shape has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the shape has enough vertices and area to be a polygon
    pub fn is_polygon(&self) -> bool {
        self.vertices.len() >= 3 && area(self) > AREA_EPSILON
    }

    /// Iterate over edges as `(start, end)` pairs, closing the ring
    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        edges(&self.vertices)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest x
    pub min_x: f64,
    /// Largest x
    pub max_x: f64,
    /// Smallest y
    pub min_y: f64,
    /// Largest y
    pub max_y: f64,
}

impl Bounds {
    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Centre of the box
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether the boxes touch or overlap, allowing `margin` of slack
    pub fn intersects(&self, other: &Self, margin: f64) -> bool {
        self.min_x <= other.max_x + margin
            && other.min_x <= self.max_x + margin
            && self.min_y <= other.max_y + margin
            && other.min_y <= self.max_y + margin
    }

    /// Whether `other` lies inside this box, allowing `margin` of slack
    pub fn encloses(&self, other: &Self, margin: f64) -> bool {
        other.min_x >= self.min_x - margin
            && other.max_x <= self.max_x + margin
            && other.min_y >= self.min_y - margin
            && other.max_y <= self.max_y + margin
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }
}

pub(crate) fn edges(vertices: &[Point]) -> impl Iterator<Item = (&Point, &Point)> + '_ {
    let count = vertices.len();
    (0..count).map(move |i| (&vertices[i], &vertices[(i + 1) % count]))
}

pub(crate) fn bounds_of(vertices: &[Point]) -> Option<Bounds> {
    let first = vertices.first()?;
    let mut bounds = Bounds {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    for vertex in &vertices[1..] {
        bounds.min_x = bounds.min_x.min(vertex.x);
        bounds.max_x = bounds.max_x.max(vertex.x);
        bounds.min_y = bounds.min_y.min(vertex.y);
        bounds.max_y = bounds.max_y.max(vertex.y);
    }
    Some(bounds)
}

/// Rotate `point` about the origin by `angle` radians
pub fn rotate_point(point: &Point, angle: f64) -> Point {
    Rotation2::new(angle) * *point
}

/// Rotate the shape by the pose heading, then translate by its position
///
/// This is a rigid motion: edge lengths and pairwise distances are kept.
pub fn transform(shape: &Shape, pose: &Pose) -> Shape {
    let isometry = pose.isometry();
    Shape::new(
        shape
            .vertices
            .iter()
            .map(|vertex| isometry.transform_point(vertex))
            .collect(),
    )
}

/// Translate every vertex by `(dx, dy)`
pub fn translate(shape: &Shape, dx: f64, dy: f64) -> Shape {
    let offset = Vec2::new(dx, dy);
    Shape::new(shape.vertices.iter().map(|vertex| vertex + offset).collect())
}

/// Axis-aligned bounds of the shape, or `None` when it has no vertices
pub fn bounding_box(shape: &Shape) -> Option<Bounds> {
    bounds_of(&shape.vertices)
}

pub(crate) fn ring_signed_area(vertices: &[Point]) -> f64 {
    edges(vertices)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        / 2.0
}

/// Shoelace area; positive for counter-clockwise rings
pub fn signed_area(shape: &Shape) -> f64 {
    ring_signed_area(&shape.vertices)
}

/// Unsigned polygon area
pub fn area(shape: &Shape) -> f64 {
    signed_area(shape).abs()
}

/// Area-weighted centroid, or `None` for degenerate shapes
pub fn centroid(shape: &Shape) -> Option<Point> {
    ring_centroid(&shape.vertices)
}

pub(crate) fn ring_centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.len() < 3 {
        return None;
    }
    let signed = ring_signed_area(vertices);
    if signed.abs() <= AREA_EPSILON {
        return None;
    }
    let (mut cx, mut cy) = (0.0, 0.0);
    for (a, b) in edges(vertices) {
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let factor = 1.0 / (6.0 * signed);
    Some(Point::new(cx * factor, cy * factor))
}

/// Split a world-space shape into its centroid and centroid-relative vertices
pub fn recentre(shape: &Shape) -> Option<(Point, Shape)> {
    let center = centroid(shape)?;
    Some((center, translate(shape, -center.x, -center.y)))
}

/// Regular polygon of `sides` vertices at `radius` around the origin
///
/// Vertex `i` sits at angle `2πi / sides` for `i` in `1..=sides`.
pub fn regular_polygon(radius: f64, sides: usize) -> Shape {
    let step = TAU / sides as f64;
    Shape::new(
        (1..=sides)
            .map(|i| {
                let angle = step * i as f64;
                Point::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn square(size: f64) -> Shape {
        Shape::from_coords(&[(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)])
    }

    #[test]
    fn test_transform_rotates_then_translates() {
        let shape = Shape::from_coords(&[(10.0, 0.0)]);
        let moved = transform(&shape, &Pose::new(5.0, 5.0, FRAC_PI_2));
        assert_relative_eq!(moved.vertices[0].x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(moved.vertices[0].y, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_transform_preserves_distances() {
        let shape = regular_polygon(30.0, 7);
        let moved = transform(&shape, &Pose::new(-120.0, 44.0, 2.3));
        for i in 0..shape.len() {
            for j in 0..shape.len() {
                let before = nalgebra::distance(&shape.vertices[i], &shape.vertices[j]);
                let after = nalgebra::distance(&moved.vertices[i], &moved.vertices[j]);
                assert_relative_eq!(before, after, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_rotate_point() {
        let rotated = rotate_point(&Point::new(1.0, 0.0), PI);
        assert_relative_eq!(rotated.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        let bounds = bounding_box(&translate(&square(10.0), 5.0, -5.0)).unwrap();
        assert_relative_eq!(bounds.min_x, 5.0);
        assert_relative_eq!(bounds.max_x, 15.0);
        assert_relative_eq!(bounds.min_y, -5.0);
        assert_relative_eq!(bounds.max_y, 5.0);
        assert_relative_eq!(bounds.width(), 10.0);
        assert!(bounding_box(&Shape::default()).is_none());
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = square(2.0);
        let cw = Shape::new(ccw.vertices.iter().rev().copied().collect());
        assert_relative_eq!(signed_area(&ccw), 4.0);
        assert_relative_eq!(signed_area(&cw), -4.0);
        assert_relative_eq!(area(&cw), 4.0);
    }

    #[test]
    fn test_centroid_of_square() {
        let center = centroid(&square(4.0)).unwrap();
        assert_relative_eq!(center.x, 2.0);
        assert_relative_eq!(center.y, 2.0);
    }

    #[test]
    fn test_centroid_of_degenerate_shape() {
        assert!(centroid(&Shape::from_coords(&[(0.0, 0.0), (1.0, 1.0)])).is_none());
        assert!(centroid(&Shape::from_coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])).is_none());
    }

    #[test]
    fn test_recentre() {
        let (center, local) = recentre(&translate(&square(2.0), 100.0, 50.0)).unwrap();
        assert_relative_eq!(center.x, 101.0);
        assert_relative_eq!(center.y, 51.0);
        let local_center = centroid(&local).unwrap();
        assert_relative_eq!(local_center.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(local_center.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_regular_polygon() {
        let hexagon = regular_polygon(10.0, 6);
        assert_eq!(hexagon.len(), 6);
        assert_relative_eq!(hexagon.vertices[5].x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(hexagon.vertices[5].y, 0.0, epsilon = 1e-9);
        assert!(signed_area(&hexagon) > 0.0);
    }
}
