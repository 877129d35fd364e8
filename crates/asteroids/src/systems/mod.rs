//! Per-tick game systems
//!
//! Registration order matters: see [`crate::game::build_scheduler`] for the
//! pipeline these systems run in.

mod alien;
mod boundary;
mod ephemeral;
mod hull;
mod launcher;
mod motion;
mod render;
mod subtractor;
mod thruster;

pub use alien::AlienPilotSystem;
pub use boundary::PositionalBoundarySystem;
pub use ephemeral::EphemeralSystem;
pub use hull::DestructibleHullSystem;
pub use launcher::MissileLauncherSystem;
pub use motion::{AccelerationSystem, VelocitySystem};
pub use render::{LabelRenderSystem, ShapeRenderSystem};
pub use subtractor::BooleanAsteroidSubtractorSystem;
pub use thruster::ThrusterSystem;

use shatter_engine::prelude::*;

use crate::components::Explosive;
use crate::prefabs::{ExplosionArea, ExplosionAreaArgs, ExplosionVisual, ExplosionVisualArgs};

/// Queue an entity's destruction along with its explosion, if it has one
///
/// Queuing the same entity twice in one pass is ignored, so an entity hit
/// by two things at once explodes only once.
pub fn destroy_with_effects(world: &World, commands: &mut Commands, entity: Entity) {
    if commands.is_destroy_queued(entity) {
        return;
    }
    if let (Some(explosive), Some(pose)) = (world.read::<Explosive>(entity), world.read::<Pose>(entity)) {
        commands.spawn::<ExplosionArea>(ExplosionAreaArgs {
            pose,
            radius: explosive.blast_radius,
        });
        for flash in explosive.flashes {
            commands.spawn::<ExplosionVisual>(ExplosionVisualArgs { pose, flash });
        }
    }
    commands.destroy(entity);
}

/// World-space outline of an entity that has both a shape and a pose
pub(crate) fn world_shape(world: &World, entity: Entity) -> Option<Shape> {
    let shape = world.read::<Shape>(entity)?;
    let pose = world.read::<Pose>(entity)?;
    Some(shatter_engine::geometry::transform(&shape, &pose))
}
