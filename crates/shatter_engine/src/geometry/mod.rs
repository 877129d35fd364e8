//! 2D polygon geometry
//!
//! Polygons are closed rings stored without a repeated closing vertex. All
//! operations are pure, deterministic for identical inputs, and compare
//! coordinates with the shared [`EPSILON`] tolerance. Degenerate input
//! (fewer than three vertices or zero area) yields an explicit empty result
//! rather than a panic.

mod clip;
mod predicates;
mod shape;
mod simplify;

pub use clip::difference;
pub use predicates::{boolean_contains, boolean_overlap, point_in_polygon};
pub use shape::{
    area, bounding_box, centroid, recentre, regular_polygon, rotate_point, signed_area, transform,
    translate, Bounds, Pose, Shape,
};
pub use simplify::{is_simple, self_intersections, simplify, unkink};

pub use crate::foundation::math::EPSILON;

/// Errors raised by polygon boolean operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The boundary graph could not be resolved into closed rings
    #[error("Boolean operation unresolved: {0}")]
    Unresolved(&'static str),
}
