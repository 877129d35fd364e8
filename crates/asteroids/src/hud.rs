//! Heads-up display drawn over the play field

use std::f64::consts::FRAC_PI_2;

use shatter_engine::geometry::transform;
use shatter_engine::prelude::*;

use crate::prefabs::SHIP_VERTICES;

const LIVES_ORIGIN_X: f64 = 20.0;
const LIVES_ORIGIN_Y: f64 = 30.0;
const LIVES_SPACING: f64 = 22.0;

/// Draw one upright ship outline per remaining life along the top-left
pub fn draw_remaining_lives(viewport: &mut dyn Viewport, lives: u32) {
    let outline = Shape::from_coords(&SHIP_VERTICES);
    let style = Style::outline(Colour::WHITE);
    for i in 0..lives {
        let pose = Pose::new(
            LIVES_ORIGIN_X + LIVES_SPACING * f64::from(i),
            LIVES_ORIGIN_Y,
            -FRAC_PI_2,
        );
        viewport.draw_shape(&transform(&outline, &pose).vertices, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_outline_per_life() {
        let mut viewport = RecordingViewport::new();
        draw_remaining_lives(&mut viewport, 3);
        assert_eq!(viewport.shape_count(), 3);

        // Nose of the third ship points up the screen
        match &viewport.commands()[2] {
            DrawCommand::Shape { vertices, .. } => {
                assert_relative_eq!(vertices[0].x, 64.0, epsilon = 1e-9);
                assert_relative_eq!(vertices[0].y, 10.0, epsilon = 1e-9);
            }
            other => panic!("unexpected draw call {other:?}"),
        }
    }

    #[test]
    fn test_no_lives_draws_nothing() {
        let mut viewport = RecordingViewport::new();
        draw_remaining_lives(&mut viewport, 0);
        assert!(viewport.commands().is_empty());
    }
}
