//! Draw passes for shapes and labels

use shatter_engine::geometry::transform;
use shatter_engine::prelude::*;

use crate::components::{Appearance, Label};

/// Draws every posed shape, using its [`Appearance`] when it has one
pub struct ShapeRenderSystem;

impl System for ShapeRenderSystem {
    fn name(&self) -> &'static str {
        "ShapeRenderSystem"
    }

    fn draw(&self, world: &World, viewport: &mut dyn Viewport) {
        for entity in world.entities_with::<Shape>() {
            let (Some(shape), Some(pose)) = (world.read::<Shape>(entity), world.read::<Pose>(entity)) else {
                continue;
            };
            let style = world
                .read::<Appearance>(entity)
                .map_or_else(Style::default, |appearance| appearance.style);
            viewport.draw_shape(&transform(&shape, &pose).vertices, &style);
        }
    }
}

/// Draws text labels at their entity's pose plus offset
pub struct LabelRenderSystem;

impl System for LabelRenderSystem {
    fn name(&self) -> &'static str {
        "LabelRenderSystem"
    }

    fn draw(&self, world: &World, viewport: &mut dyn Viewport) {
        for entity in world.entities_with::<Label>() {
            let (Some(label), Some(pose)) = (world.read::<Label>(entity), world.read::<Pose>(entity)) else {
                continue;
            };
            let anchor = Pose::new(pose.x + label.offset.x, pose.y + label.offset.y, pose.a);
            let style = Style {
                font_size: label.font_size,
                ..Style::default()
            };
            viewport.draw_label(&anchor, &label.text, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefabs::{Prompt, PromptArgs};
    use shatter_engine::foundation::math::Vec2;

    #[test]
    fn test_label_drawn_at_offset() {
        let mut world = World::new();
        world.create::<Prompt>(PromptArgs {
            pose: Pose::new(640.0, 360.0, 0.0),
            text: "Hello".to_string(),
            font_size: 40.0,
            offset: Vec2::new(-200.0, 0.0),
        });
        let mut viewport = RecordingViewport::new();

        LabelRenderSystem.draw(&world, &mut viewport);

        match &viewport.commands()[0] {
            DrawCommand::Label { pose, text, style } => {
                assert_eq!(pose.x, 440.0);
                assert_eq!(text, "Hello");
                assert_eq!(style.font_size, 40.0);
            }
            other => panic!("unexpected draw call {other:?}"),
        }
    }
}
