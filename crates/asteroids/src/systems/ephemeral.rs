//! Limited lifetimes

use shatter_engine::prelude::*;

use super::destroy_with_effects;
use crate::components::Ephemeral;

/// Counts lifetimes down and destroys entities whose time is up
///
/// Every tick consumes at least one millisecond, so an entity created with
/// one millisecond left lives for exactly one tick.
pub struct EphemeralSystem;

impl System for EphemeralSystem {
    fn name(&self) -> &'static str {
        "EphemeralSystem"
    }

    fn update(&mut self, world: &mut World, commands: &mut Commands, delta_ms: f64) {
        let elapsed = delta_ms.max(1.0);
        for entity in world.entities_with::<Ephemeral>() {
            let Some(mut ephemeral) = world.read::<Ephemeral>(entity) else {
                continue;
            };
            ephemeral.remaining_ms -= elapsed;
            if ephemeral.remaining_ms <= 0.0 {
                destroy_with_effects(world, commands, entity);
            } else {
                world.write(entity, ephemeral);
            }
        }
    }
}
