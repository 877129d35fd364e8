//! Polygon boolean difference
//!
//! Both rings are split at every point where their boundaries meet. Each
//! sub-segment is classified against the other polygon, the surviving
//! segments are linked into a directed boundary graph, and closed rings are
//! traced by always taking the sharpest clockwise turn so the remaining
//! material stays on the left.
//!
//! A difference that would leave a hole is resolved by cutting the subject
//! through the clip polygon's centroid and subtracting from each side, so
//! the output is always a list of hole-free simple polygons.

use std::f64::consts::TAU;

use log::{debug, trace};

use crate::foundation::math::{distance_to_segment, points_coincide, Point, Vec2, EPSILON};

use super::predicates::{contains_point, segment_contacts};
use super::shape::{bounds_of, edges, ring_centroid, ring_signed_area, Shape, AREA_EPSILON};
use super::simplify::dedupe;
use super::GeometryError;

const MAX_SPLIT_DEPTH: usize = 4;
const SPLIT_MARGIN: f64 = 10.0;

/// Subtract `clip` from `subject`
///
/// Returns the pieces of `subject` not covered by `clip`: empty when the
/// subject is fully covered or degenerate, the subject itself when the two
/// do not meet or the clip is degenerate. Every piece is a simple
/// counter-clockwise ring with positive area, and their total area never
/// exceeds the subject's.
pub fn difference(subject: &Shape, clip: &Shape) -> Result<Vec<Shape>, GeometryError> {
    difference_at_depth(subject, clip, 0)
}

fn difference_at_depth(
    subject: &Shape,
    clip: &Shape,
    depth: usize,
) -> Result<Vec<Shape>, GeometryError> {
    let Some(a) = normalise(&subject.vertices) else {
        return Ok(Vec::new());
    };
    let Some(b) = normalise(&clip.vertices) else {
        return Ok(vec![Shape::new(a)]);
    };
    let (Some(bounds_a), Some(bounds_b)) = (bounds_of(&a), bounds_of(&b)) else {
        return Ok(vec![Shape::new(a)]);
    };
    if !bounds_a.intersects(&bounds_b, EPSILON) {
        return Ok(vec![Shape::new(a)]);
    }

    let graph = BoundaryGraph::build(&a, &b);
    if !graph.touched {
        if a.iter().any(|vertex| contains_point(&b, vertex)) {
            return Ok(Vec::new());
        }
        if b.iter().any(|vertex| contains_point(&a, vertex)) {
            return split_and_subtract(&a, &b, depth);
        }
        return Ok(vec![Shape::new(a)]);
    }

    let mut outers = Vec::new();
    let mut holes = 0;
    for ring in graph.trace()? {
        let Some(ring) = normalise_oriented(&ring) else {
            continue;
        };
        if ring_signed_area(&ring) > 0.0 {
            outers.push(Shape::new(ring));
        } else {
            holes += 1;
        }
    }

    if holes == 0 {
        return Ok(outers);
    }
    if depth >= MAX_SPLIT_DEPTH {
        debug!("Dropping {} hole rings at split depth {}", holes, depth);
        return Ok(outers);
    }
    split_and_subtract(&a, &b, depth)
}

/// Cut `a` along the vertical through the centroid of `b`, then subtract `b`
/// from both halves
fn split_and_subtract(a: &[Point], b: &[Point], depth: usize) -> Result<Vec<Shape>, GeometryError> {
    let (Some(bounds_a), Some(bounds_b)) = (bounds_of(a), bounds_of(b)) else {
        return Ok(vec![Shape::new(a.to_vec())]);
    };
    let cut_x = ring_centroid(b).map_or_else(|| bounds_b.center().x, |center| center.x);
    let frame = bounds_a.expanded(SPLIT_MARGIN);
    trace!("Splitting subject at x = {:.3} (depth {})", cut_x, depth);

    let halves = [
        // Removes everything right of the cut
        Shape::from_coords(&[
            (cut_x, frame.min_y),
            (frame.max_x, frame.min_y),
            (frame.max_x, frame.max_y),
            (cut_x, frame.max_y),
        ]),
        // Removes everything left of the cut
        Shape::from_coords(&[
            (frame.min_x, frame.min_y),
            (cut_x, frame.min_y),
            (cut_x, frame.max_y),
            (frame.min_x, frame.max_y),
        ]),
    ];

    let subject = Shape::new(a.to_vec());
    let clip = Shape::new(b.to_vec());
    let mut pieces = Vec::new();
    for half in &halves {
        for part in difference_at_depth(&subject, half, depth + 1)? {
            pieces.extend(difference_at_depth(&part, &clip, depth + 1)?);
        }
    }
    Ok(pieces)
}

/// Deduplicate, drop collinear vertices and orient counter-clockwise
fn normalise(vertices: &[Point]) -> Option<Vec<Point>> {
    let mut ring = normalise_oriented(vertices)?;
    if ring_signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    Some(ring)
}

/// Deduplicate and drop collinear vertices, keeping the orientation
fn normalise_oriented(vertices: &[Point]) -> Option<Vec<Point>> {
    let mut ring = dedupe(vertices);
    loop {
        let count = ring.len();
        if count < 3 {
            return None;
        }
        let collinear = (0..count).find(|&i| {
            let previous = &ring[(i + count - 1) % count];
            let next = &ring[(i + 1) % count];
            !points_coincide(previous, next) && distance_to_segment(&ring[i], previous, next) < EPSILON
        });
        match collinear {
            Some(index) => {
                ring.remove(index);
            }
            None => break,
        }
    }
    if ring_signed_area(&ring).abs() <= AREA_EPSILON {
        return None;
    }
    Some(ring)
}

enum Location {
    Inside,
    Outside,
    Boundary { same_direction: bool },
}

fn locate(midpoint: &Point, direction: &Vec2, polygon: &[Point]) -> Location {
    for (start, end) in edges(polygon) {
        if distance_to_segment(midpoint, start, end) < EPSILON {
            return Location::Boundary {
                same_direction: direction.dot(&(end - start)) > 0.0,
            };
        }
    }
    if contains_point(polygon, midpoint) {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// Directed boundary of the difference, as edges between merged nodes
struct BoundaryGraph {
    nodes: Vec<Point>,
    edges: Vec<(usize, usize)>,
    touched: bool,
}

impl BoundaryGraph {
    fn build(a: &[Point], b: &[Point]) -> Self {
        let mut cuts_a: Vec<Vec<(f64, Point)>> = vec![Vec::new(); a.len()];
        let mut cuts_b: Vec<Vec<(f64, Point)>> = vec![Vec::new(); b.len()];
        let mut touched = false;

        for (i, (a1, a2)) in edges(a).enumerate() {
            for (j, (b1, b2)) in edges(b).enumerate() {
                for contact in segment_contacts(a1, a2, b1, b2) {
                    touched = true;
                    cuts_a[i].push((contact.t, contact.point));
                    cuts_b[j].push((contact.u, contact.point));
                }
            }
        }

        let mut graph = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            touched,
        };
        if !touched {
            return graph;
        }

        for (start, end, midpoint) in graph.split_ring(a, cuts_a) {
            let direction = graph.nodes[end] - graph.nodes[start];
            match locate(&midpoint, &direction, b) {
                Location::Outside | Location::Boundary { same_direction: false } => {
                    graph.edges.push((start, end));
                }
                Location::Inside | Location::Boundary { same_direction: true } => {}
            }
        }
        for (start, end, midpoint) in graph.split_ring(b, cuts_b) {
            let direction = graph.nodes[end] - graph.nodes[start];
            if let Location::Inside = locate(&midpoint, &direction, a) {
                graph.edges.push((end, start));
            }
        }
        graph
    }

    fn node(&mut self, point: Point) -> usize {
        if let Some(index) = self.nodes.iter().position(|node| points_coincide(node, &point)) {
            return index;
        }
        self.nodes.push(point);
        self.nodes.len() - 1
    }

    /// Split every edge of `ring` at its cut points
    fn split_ring(
        &mut self,
        ring: &[Point],
        cuts: Vec<Vec<(f64, Point)>>,
    ) -> Vec<(usize, usize, Point)> {
        let count = ring.len();
        let mut segments = Vec::new();
        for (i, mut edge_cuts) in cuts.into_iter().enumerate() {
            edge_cuts.push((0.0, ring[i]));
            edge_cuts.push((1.0, ring[(i + 1) % count]));
            edge_cuts.sort_by(|x, y| x.0.total_cmp(&y.0));

            let ids: Vec<(usize, Point)> = edge_cuts
                .into_iter()
                .map(|(_, point)| (self.node(point), point))
                .collect();
            for pair in ids.windows(2) {
                let ((from, from_point), (to, to_point)) = (pair[0], pair[1]);
                if from != to {
                    segments.push((from, to, nalgebra::center(&from_point, &to_point)));
                }
            }
        }
        segments
    }

    /// Link edges into closed rings of points
    fn trace(&self) -> Result<Vec<Vec<Point>>, GeometryError> {
        let mut outgoing = vec![Vec::new(); self.nodes.len()];
        for (index, &(from, _)) in self.edges.iter().enumerate() {
            outgoing[from].push(index);
        }

        let mut used = vec![false; self.edges.len()];
        let mut rings = Vec::new();
        for start in 0..self.edges.len() {
            if used[start] {
                continue;
            }
            used[start] = true;
            let mut ring = vec![self.edges[start].0];
            let mut current = start;

            loop {
                let (from, to) = self.edges[current];
                let back = self.nodes[from] - self.nodes[to];
                let next = outgoing[to]
                    .iter()
                    .copied()
                    .filter(|&candidate| !used[candidate] || candidate == start)
                    .min_by(|&x, &y| {
                        let turn_x = clockwise_turn(&back, &self.direction(x));
                        let turn_y = clockwise_turn(&back, &self.direction(y));
                        turn_x.total_cmp(&turn_y)
                    })
                    .ok_or(GeometryError::Unresolved("boundary ring does not close"))?;

                if next == start {
                    break;
                }
                used[next] = true;
                ring.push(to);
                current = next;
                if ring.len() > self.edges.len() {
                    return Err(GeometryError::Unresolved("boundary ring does not terminate"));
                }
            }

            for ids in split_at_repeats(ring) {
                rings.push(ids.into_iter().map(|id| self.nodes[id]).collect());
            }
        }
        Ok(rings)
    }

    fn direction(&self, edge: usize) -> Vec2 {
        let (from, to) = self.edges[edge];
        self.nodes[to] - self.nodes[from]
    }
}

/// Clockwise angle from `reference` to `candidate` in `(0, 2π]`
fn clockwise_turn(reference: &Vec2, candidate: &Vec2) -> f64 {
    let angle = (reference.y.atan2(reference.x) - candidate.y.atan2(candidate.x)).rem_euclid(TAU);
    if angle <= 1e-12 {
        TAU
    } else {
        angle
    }
}

/// Break a ring that revisits a node into separate loops
fn split_at_repeats(ring: Vec<usize>) -> Vec<Vec<usize>> {
    let mut loops = Vec::new();
    let mut pending = vec![ring];
    while let Some(ring) = pending.pop() {
        let repeat = ring.iter().enumerate().find_map(|(j, id)| {
            ring[..j].iter().position(|earlier| earlier == id).map(|i| (i, j))
        });
        match repeat {
            Some((i, j)) => {
                let inner = ring[i..j].to_vec();
                let mut outer = ring[..i].to_vec();
                outer.extend_from_slice(&ring[j..]);
                pending.push(outer);
                pending.push(inner);
            }
            None => loops.push(ring),
        }
    }
    loops
}
