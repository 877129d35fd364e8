use crate::foundation::math::{distance_to_segment, orient, Point, EPSILON};

use super::shape::{bounds_of, edges, Shape};

/// Where two segments meet
///
/// `t` and `u` are the parameters along the first and second segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Contact {
    pub t: f64,
    pub u: f64,
    pub point: Point,
}

/// All points where segments `p1 -> p2` and `q1 -> q2` meet within tolerance
///
/// Crossing points close to an endpoint snap onto that endpoint. Collinear
/// overlaps report the endpoints of the shared stretch.
pub(crate) fn segment_contacts(p1: &Point, p2: &Point, q1: &Point, q2: &Point) -> Vec<Contact> {
    let r = p2 - p1;
    let s = q2 - q1;
    let r_len = r.norm();
    let s_len = s.norm();
    if r_len < f64::EPSILON || s_len < f64::EPSILON {
        return Vec::new();
    }

    let t_tolerance = EPSILON / r_len;
    let u_tolerance = EPSILON / s_len;
    let denominator = r.perp(&s);
    let offset = q1 - p1;

    if denominator.abs() <= 1e-9 * r_len * s_len {
        let q1_off_line = (r.perp(&(q1 - p1)) / r_len).abs();
        let q2_off_line = (r.perp(&(q2 - p1)) / r_len).abs();
        if q1_off_line >= EPSILON || q2_off_line >= EPSILON {
            return Vec::new();
        }

        let mut contacts = Vec::new();
        for (endpoint, u) in [(q1, 0.0), (q2, 1.0)] {
            let t = (endpoint - p1).dot(&r) / (r_len * r_len);
            if (-t_tolerance..=1.0 + t_tolerance).contains(&t) {
                contacts.push(Contact {
                    t: t.clamp(0.0, 1.0),
                    u,
                    point: *endpoint,
                });
            }
        }
        for (endpoint, t) in [(p1, 0.0), (p2, 1.0)] {
            let u = (endpoint - q1).dot(&s) / (s_len * s_len);
            if (-u_tolerance..=1.0 + u_tolerance).contains(&u) {
                contacts.push(Contact {
                    t,
                    u: u.clamp(0.0, 1.0),
                    point: *endpoint,
                });
            }
        }
        return contacts;
    }

    let t = offset.perp(&s) / denominator;
    let u = offset.perp(&r) / denominator;
    if t < -t_tolerance || t > 1.0 + t_tolerance || u < -u_tolerance || u > 1.0 + u_tolerance {
        return Vec::new();
    }

    let (t, u) = (t.clamp(0.0, 1.0), u.clamp(0.0, 1.0));
    let contact = if t * r_len < EPSILON {
        Contact { t: 0.0, u, point: *p1 }
    } else if (1.0 - t) * r_len < EPSILON {
        Contact { t: 1.0, u, point: *p2 }
    } else if u * s_len < EPSILON {
        Contact { t, u: 0.0, point: *q1 }
    } else if (1.0 - u) * s_len < EPSILON {
        Contact { t, u: 1.0, point: *q2 }
    } else {
        Contact { t, u, point: p1 + r * t }
    };
    vec![contact]
}

/// Whether the segments cross each other's interiors by more than the tolerance
pub(crate) fn segments_cross(p1: &Point, p2: &Point, q1: &Point, q2: &Point) -> bool {
    let q_len = nalgebra::distance(q1, q2);
    let p_len = nalgebra::distance(p1, p2);
    if q_len < f64::EPSILON || p_len < f64::EPSILON {
        return false;
    }
    let d1 = orient(q1, q2, p1) / q_len;
    let d2 = orient(q1, q2, p2) / q_len;
    let d3 = orient(p1, p2, q1) / p_len;
    let d4 = orient(p1, p2, q2) / p_len;
    let straddles = |a: f64, b: f64| (a > EPSILON && b < -EPSILON) || (a < -EPSILON && b > EPSILON);
    straddles(d1, d2) && straddles(d3, d4)
}

fn segments_touch(p1: &Point, p2: &Point, q1: &Point, q2: &Point) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }
    distance_to_segment(p1, q1, q2) < EPSILON
        || distance_to_segment(p2, q1, q2) < EPSILON
        || distance_to_segment(q1, p1, p2) < EPSILON
        || distance_to_segment(q2, p1, p2) < EPSILON
}

pub(crate) fn on_boundary(point: &Point, vertices: &[Point]) -> bool {
    edges(vertices).any(|(a, b)| distance_to_segment(point, a, b) < EPSILON)
}

/// Even-odd ray cast with a bounding box pre-check
pub(crate) fn contains_point(vertices: &[Point], point: &Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let Some(bounds) = bounds_of(vertices) else {
        return false;
    };
    if point.x < bounds.min_x
        || point.x > bounds.max_x
        || point.y < bounds.min_y
        || point.y > bounds.max_y
    {
        return false;
    }

    let mut inside = false;
    for (a, b) in edges(vertices) {
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Whether `point` lies inside `polygon` by the even-odd rule
///
/// Points exactly on an edge may land on either side, but the answer is
/// always the same for the same input.
pub fn point_in_polygon(point: &Point, polygon: &Shape) -> bool {
    contains_point(&polygon.vertices, point)
}

/// Whether the interiors or boundaries of two polygons meet
///
/// True when any pair of edges touches within tolerance, or when one
/// polygon holds a vertex of the other. Containment therefore implies
/// overlap.
pub fn boolean_overlap(a: &Shape, b: &Shape) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    let (Some(bounds_a), Some(bounds_b)) = (bounds_of(&a.vertices), bounds_of(&b.vertices)) else {
        return false;
    };
    if !bounds_a.intersects(&bounds_b, EPSILON) {
        return false;
    }

    for (a1, a2) in a.edges() {
        for (b1, b2) in b.edges() {
            if segments_touch(a1, a2, b1, b2) {
                return true;
            }
        }
    }

    a.vertices.iter().any(|v| contains_point(&b.vertices, v))
        || b.vertices.iter().any(|v| contains_point(&a.vertices, v))
}

/// Whether `container` fully encloses `contained`, boundaries included
pub fn boolean_contains(container: &Shape, contained: &Shape) -> bool {
    if container.len() < 3 || contained.len() < 3 {
        return false;
    }
    let (Some(outer), Some(inner)) = (
        bounds_of(&container.vertices),
        bounds_of(&contained.vertices),
    ) else {
        return false;
    };
    if !outer.encloses(&inner, EPSILON) {
        return false;
    }

    let inside_or_on = |point: &Point| {
        on_boundary(point, &container.vertices) || contains_point(&container.vertices, point)
    };
    if !contained.vertices.iter().all(inside_or_on) {
        return false;
    }
    // A concave container can hold every vertex while an edge leaves it.
    if !contained
        .edges()
        .all(|(a, b)| inside_or_on(&nalgebra::center(a, b)))
    {
        return false;
    }

    !container.edges().any(|(a1, a2)| {
        contained
            .edges()
            .any(|(b1, b2)| segments_cross(a1, a2, b1, b2))
    })
}
