//! Asteroid fragmentation
//!
//! When a subtractor touches an asteroid, the subtractor's outline is cut
//! out of the asteroid. What is left is cleaned up (simplified, untangled,
//! stripped of slivers too small to matter) and returned as fragments,
//! largest first. Each fragment carries its own pose at its centroid and a
//! shape relative to that centroid, so it can become an asteroid directly.

use log::warn;
use shatter_engine::geometry::{
    area, boolean_contains, boolean_overlap, bounding_box, difference, is_simple, recentre,
    simplify, unkink,
};
use shatter_engine::prelude::*;

use crate::config::FragmentationConfig;

/// A piece of a fragmented asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Pose at the fragment's centroid, heading zero
    pub pose: Pose,
    /// Outline relative to the centroid
    pub shape: Shape,
    /// Area of the outline
    pub area: f64,
}

/// What a hit does to an asteroid
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing worth keeping is left
    Destroyed,
    /// Surviving fragments, largest first
    Fragmented(Vec<Fragment>),
}

/// Whether a subtractor touches an asteroid, both in world coordinates
pub fn is_hit(asteroid: &Shape, subtractor: &Shape) -> bool {
    boolean_overlap(subtractor, asteroid) || boolean_contains(subtractor, asteroid)
}

/// Cut `subtractor` out of `asteroid`, both in world coordinates
pub fn fragment(asteroid: &Shape, subtractor: &Shape, config: &FragmentationConfig) -> Outcome {
    let remainder = match difference(asteroid, subtractor) {
        Ok(remainder) => remainder,
        Err(err) => {
            warn!("Asteroid destroyed after failed subtraction: {}", err);
            return Outcome::Destroyed;
        }
    };

    let mut fragments: Vec<Fragment> = remainder
        .iter()
        .filter_map(|piece| simplify(piece, config.simplify_tolerance))
        .flat_map(|piece| {
            if is_simple(&piece) {
                vec![piece]
            } else {
                unkink(&piece)
            }
        })
        .filter(|piece| !is_debris(piece, config.min_fragment_extent))
        .filter_map(|piece| {
            let (center, local) = recentre(&piece)?;
            Some(Fragment {
                pose: Pose::new(center.x, center.y, 0.0),
                area: area(&local),
                shape: local,
            })
        })
        .collect();

    if fragments.is_empty() {
        return Outcome::Destroyed;
    }
    fragments.sort_by(|a, b| b.area.total_cmp(&a.area));
    Outcome::Fragmented(fragments)
}

/// Pieces with too few vertices, or both narrower and shorter than the
/// minimum extent, are not worth keeping
fn is_debris(piece: &Shape, min_extent: f64) -> bool {
    if piece.len() < 3 {
        return true;
    }
    bounding_box(piece).map_or(true, |bounds| {
        bounds.width() < min_extent && bounds.height() < min_extent
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shatter_engine::geometry::{regular_polygon, transform, translate};

    fn config() -> FragmentationConfig {
        FragmentationConfig::default()
    }

    #[test]
    fn test_engulfed_asteroid_is_destroyed() {
        let asteroid = regular_polygon(40.0, 6);
        let blast = regular_polygon(200.0, 10);
        assert!(is_hit(&asteroid, &blast));
        assert_eq!(fragment(&asteroid, &blast, &config()), Outcome::Destroyed);
    }

    #[test]
    fn test_bite_leaves_one_fragment_offset_from_blast() {
        let asteroid = translate(&regular_polygon(50.0, 6), 100.0, 100.0);
        let blast = translate(&regular_polygon(40.0, 10), 120.0, 100.0);
        assert!(is_hit(&asteroid, &blast));

        let Outcome::Fragmented(fragments) = fragment(&asteroid, &blast, &config()) else {
            panic!("expected a fragment");
        };
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].pose.x < 100.0);
        assert_relative_eq!(fragments[0].pose.a, 0.0);
    }

    #[test]
    fn test_fragments_are_centred_on_their_pose() {
        let asteroid = translate(&regular_polygon(80.0, 20), 400.0, 300.0);
        let blade = Shape::from_coords(&[(390.0, 100.0), (410.0, 100.0), (410.0, 500.0), (390.0, 500.0)]);

        let Outcome::Fragmented(fragments) = fragment(&asteroid, &blade, &config()) else {
            panic!("expected fragments");
        };
        assert_eq!(fragments.len(), 2);
        for piece in &fragments {
            let center = shatter_engine::geometry::centroid(&piece.shape).unwrap();
            assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
            assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
            let world = transform(&piece.shape, &piece.pose);
            assert!(boolean_contains(&asteroid, &world) || boolean_overlap(&asteroid, &world));
        }
    }

    #[test]
    fn test_fragments_sorted_by_area() {
        let asteroid = translate(&regular_polygon(80.0, 20), 0.0, 0.0);
        let blade = Shape::from_coords(&[(20.0, -200.0), (30.0, -200.0), (30.0, 200.0), (20.0, 200.0)]);

        let Outcome::Fragmented(fragments) = fragment(&asteroid, &blade, &config()) else {
            panic!("expected fragments");
        };
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].area > fragments[1].area);
        assert!(fragments[0].pose.x < fragments[1].pose.x);
    }

    #[test]
    fn test_small_slivers_are_discarded() {
        let asteroid = Shape::from_coords(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        let blast = Shape::from_coords(&[(-10.0, -10.0), (80.0, -10.0), (80.0, 110.0), (-10.0, 110.0)]);

        // What remains is 20 wide and 100 tall: kept because it is tall enough.
        let Outcome::Fragmented(fragments) = fragment(&asteroid, &blast, &config()) else {
            panic!("expected a fragment");
        };
        assert_eq!(fragments.len(), 1);

        let corner = Shape::from_coords(&[(-10.0, -10.0), (80.0, -10.0), (80.0, 80.0), (-10.0, 80.0)]);
        let bigger = Shape::from_coords(&[(-10.0, -10.0), (110.0, -10.0), (110.0, 80.0), (-10.0, 80.0)]);
        assert!(matches!(fragment(&asteroid, &corner, &config()), Outcome::Fragmented(_)));
        // A 100x20 strip survives, a 20x20 square would not.
        let Outcome::Fragmented(strip) = fragment(&asteroid, &bigger, &config()) else {
            panic!("expected a strip");
        };
        assert_eq!(strip.len(), 1);

        let mostly = Shape::from_coords(&[(-10.0, -10.0), (110.0, -10.0), (110.0, 80.0), (80.0, 80.0), (80.0, 110.0), (-10.0, 110.0)]);
        assert_eq!(fragment(&asteroid, &mostly, &config()), Outcome::Destroyed);
    }

    #[test]
    fn test_area_is_conserved_or_lost() {
        let asteroid = translate(&regular_polygon(90.0, 20), 200.0, 200.0);
        let blast = translate(&regular_polygon(50.0, 10), 260.0, 230.0);
        if let Outcome::Fragmented(fragments) = fragment(&asteroid, &blast, &config()) {
            let total: f64 = fragments.iter().map(|piece| piece.area).sum();
            assert!(total <= area(&asteroid) + 1e-6);
        }
    }

    #[test]
    fn test_disjoint_is_not_a_hit() {
        let asteroid = translate(&regular_polygon(40.0, 6), 0.0, 0.0);
        let blast = translate(&regular_polygon(40.0, 10), 500.0, 0.0);
        assert!(!is_hit(&asteroid, &blast));
    }
}
