//! Collisions between destructible hulls and asteroids

use shatter_engine::geometry::boolean_overlap;
use shatter_engine::prelude::*;

use super::{destroy_with_effects, world_shape};
use crate::components::DestructibleHull;
use crate::prefabs::Asteroid;

/// Destroys any hull that touches an asteroid
pub struct DestructibleHullSystem;

impl System for DestructibleHullSystem {
    fn name(&self) -> &'static str {
        "DestructibleHullSystem"
    }

    fn update(&mut self, world: &mut World, commands: &mut Commands, _delta_ms: f64) {
        let asteroids: Vec<Shape> = world
            .entities_of_kind::<Asteroid>()
            .into_iter()
            .filter_map(|asteroid| world_shape(world, asteroid))
            .collect();
        if asteroids.is_empty() {
            return;
        }

        for hull in world.entities_with::<DestructibleHull>() {
            let Some(hull_shape) = world_shape(world, hull) else {
                continue;
            };
            if asteroids
                .iter()
                .any(|asteroid| boolean_overlap(&hull_shape, asteroid))
            {
                log::debug!("{:?} hull breached", hull);
                destroy_with_effects(world, commands, hull);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Velocity;
    use crate::prefabs::{AsteroidArgs, ExplosionArea, Ship, ShipArgs};
    use shatter_engine::geometry::regular_polygon;

    fn spawn_ship(world: &mut World, x: f64) -> Entity {
        world.create::<Ship>(ShipArgs {
            pose: Pose::new(x, 100.0, 0.0),
            thrust: 300.0,
            launcher_cooldown_ms: 200.0,
        })
    }

    fn spawn_asteroid(world: &mut World) -> Entity {
        world.create::<Asteroid>(AsteroidArgs {
            pose: Pose::new(100.0, 100.0, 0.0),
            shape: regular_polygon(50.0, 12),
            velocity: Velocity::default(),
        })
    }

    #[test]
    fn test_touching_hull_explodes() {
        let mut world = World::new();
        let asteroid = spawn_asteroid(&mut world);
        let ship = spawn_ship(&mut world, 160.0);
        let mut commands = Commands::new();

        DestructibleHullSystem.update(&mut world, &mut commands, 16.0);
        world.apply(&mut commands);

        assert!(!world.is_alive(ship));
        assert!(world.is_alive(asteroid));
        assert_eq!(world.count_of_kind::<ExplosionArea>(), 1);
    }

    #[test]
    fn test_distant_hull_survives() {
        let mut world = World::new();
        spawn_asteroid(&mut world);
        let ship = spawn_ship(&mut world, 400.0);
        let mut commands = Commands::new();

        DestructibleHullSystem.update(&mut world, &mut commands, 16.0);

        assert!(commands.is_empty());
        assert!(world.is_alive(ship));
    }
}
