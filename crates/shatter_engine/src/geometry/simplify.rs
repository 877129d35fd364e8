use crate::foundation::math::{distance_to_segment, points_coincide, Point};

use super::predicates::segment_contacts;
use super::shape::{ring_signed_area, Shape, AREA_EPSILON};

/// Drop consecutive coincident vertices, including across the closing edge
pub(crate) fn dedupe(vertices: &[Point]) -> Vec<Point> {
    let mut ring: Vec<Point> = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        if ring.last().map_or(true, |last| !points_coincide(last, vertex)) {
            ring.push(*vertex);
        }
    }
    while ring.len() > 1 && points_coincide(&ring[0], &ring[ring.len() - 1]) {
        ring.pop();
    }
    ring
}

fn radial_distance(ring: &[Point], tolerance: f64) -> Vec<Point> {
    let mut kept = vec![ring[0]];
    for vertex in &ring[1..] {
        if kept
            .last()
            .is_some_and(|last| nalgebra::distance(last, vertex) > tolerance)
        {
            kept.push(*vertex);
        }
    }
    if kept.len() > 1 && nalgebra::distance(&kept[0], &kept[kept.len() - 1]) <= tolerance {
        kept.pop();
    }
    kept
}

fn douglas_peucker(points: &[Point], first: usize, last: usize, tolerance: f64, keep: &mut [bool]) {
    let mut stack = vec![(first, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (mut farthest, mut max_distance) = (start, 0.0);
        for index in start + 1..end {
            let distance = distance_to_segment(&points[index], &points[start], &points[end]);
            if distance > max_distance {
                farthest = index;
                max_distance = distance;
            }
        }
        if max_distance > tolerance {
            keep[farthest] = true;
            stack.push((start, farthest));
            stack.push((farthest, end));
        }
    }
}

/// Reduce vertex count while staying within `tolerance` of the original ring
///
/// Runs a radial-distance pass followed by Douglas-Peucker on the closed
/// ring. Returns `None` when fewer than three vertices or no area remain.
pub fn simplify(shape: &Shape, tolerance: f64) -> Option<Shape> {
    let ring = dedupe(&shape.vertices);
    if ring.len() < 3 {
        return None;
    }

    let ring = if tolerance > 0.0 {
        let radial = radial_distance(&ring, tolerance);
        if radial.len() < 3 {
            return None;
        }

        // Anchor the ring at its first vertex and the vertex farthest from it.
        let anchor = radial[0];
        let split = (1..radial.len())
            .max_by(|&a, &b| {
                nalgebra::distance(&anchor, &radial[a])
                    .total_cmp(&nalgebra::distance(&anchor, &radial[b]))
            })
            .unwrap_or(1);

        let mut closed = radial.clone();
        closed.push(anchor);
        let mut keep = vec![false; closed.len()];
        keep[0] = true;
        keep[split] = true;
        douglas_peucker(&closed, 0, split, tolerance, &mut keep);
        douglas_peucker(&closed, split, closed.len() - 1, tolerance, &mut keep);

        radial
            .iter()
            .zip(keep)
            .filter_map(|(vertex, kept)| kept.then_some(*vertex))
            .collect()
    } else {
        ring
    };

    if ring.len() < 3 || ring_signed_area(&ring).abs() <= AREA_EPSILON {
        return None;
    }
    Some(Shape::new(ring))
}

fn non_adjacent_pairs(count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..count).flat_map(move |i| {
        (i + 2..count)
            .filter(move |&j| !(i == 0 && j == count - 1))
            .map(move |j| (i, j))
    })
}

fn first_kink(ring: &[Point]) -> Option<(usize, usize, Point)> {
    let count = ring.len();
    non_adjacent_pairs(count).find_map(|(i, j)| {
        segment_contacts(&ring[i], &ring[(i + 1) % count], &ring[j], &ring[(j + 1) % count])
            .first()
            .map(|contact| (i, j, contact.point))
    })
}

/// Points where non-adjacent edges of the ring meet
pub fn self_intersections(shape: &Shape) -> Vec<Point> {
    let ring = dedupe(&shape.vertices);
    let count = ring.len();
    non_adjacent_pairs(count)
        .flat_map(|(i, j)| {
            segment_contacts(&ring[i], &ring[(i + 1) % count], &ring[j], &ring[(j + 1) % count])
        })
        .map(|contact| contact.point)
        .collect()
}

/// Whether no two non-adjacent edges meet
pub fn is_simple(shape: &Shape) -> bool {
    self_intersections(shape).is_empty()
}

/// Split a self-intersecting ring into simple counter-clockwise polygons
///
/// Each crossing or pinch point divides the ring into two loops, which are
/// split further until none remain. Loops without area are dropped.
pub fn unkink(shape: &Shape) -> Vec<Shape> {
    let mut pieces = Vec::new();
    let mut pending = vec![dedupe(&shape.vertices)];

    while let Some(ring) = pending.pop() {
        if ring.len() < 3 {
            continue;
        }
        if let Some((i, j, point)) = first_kink(&ring) {
            let mut inner = vec![point];
            inner.extend_from_slice(&ring[i + 1..=j]);
            let mut outer = vec![point];
            outer.extend_from_slice(&ring[j + 1..]);
            outer.extend_from_slice(&ring[..=i]);
            pending.push(dedupe(&outer));
            pending.push(dedupe(&inner));
            continue;
        }

        let signed = ring_signed_area(&ring);
        if signed.abs() <= AREA_EPSILON {
            continue;
        }
        let mut ring = ring;
        if signed < 0.0 {
            ring.reverse();
        }
        pieces.push(Shape::new(ring));
    }
    pieces
}
