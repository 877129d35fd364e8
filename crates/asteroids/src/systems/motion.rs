//! Newtonian motion

use shatter_engine::prelude::*;

use crate::components::{Acceleration, Velocity};

/// Integrates acceleration into velocity
pub struct AccelerationSystem;

impl System for AccelerationSystem {
    fn name(&self) -> &'static str {
        "AccelerationSystem"
    }

    fn update(&mut self, world: &mut World, _commands: &mut Commands, delta_ms: f64) {
        let dt = delta_ms / 1000.0;
        world.for_each_with::<Acceleration, _>(|world, entity| {
            let Some(acceleration) = world.read::<Acceleration>(entity) else {
                return;
            };
            world.modify::<Velocity>(entity, |velocity| {
                velocity.x += acceleration.x * dt;
                velocity.y += acceleration.y * dt;
                velocity.w += acceleration.w * dt;
            });
        });
    }
}

/// Integrates velocity into pose
pub struct VelocitySystem;

impl System for VelocitySystem {
    fn name(&self) -> &'static str {
        "VelocitySystem"
    }

    fn update(&mut self, world: &mut World, _commands: &mut Commands, delta_ms: f64) {
        let dt = delta_ms / 1000.0;
        world.for_each_with::<Velocity, _>(|world, entity| {
            let Some(velocity) = world.read::<Velocity>(entity) else {
                return;
            };
            world.modify::<Pose>(entity, |pose| {
                pose.x += velocity.x * dt;
                pose.y += velocity.y * dt;
                pose.a += velocity.w * dt;
            });
        });
    }
}
