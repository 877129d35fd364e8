//! Screen wrap-around

use shatter_engine::prelude::*;

/// Wraps poses that leave the playfield to the opposite edge
pub struct PositionalBoundarySystem {
    width: f64,
    height: f64,
}

impl PositionalBoundarySystem {
    /// Playfield of `width` by `height` starting at the origin
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl System for PositionalBoundarySystem {
    fn name(&self) -> &'static str {
        "PositionalBoundarySystem"
    }

    fn update(&mut self, world: &mut World, _commands: &mut Commands, _delta_ms: f64) {
        let (width, height) = (self.width, self.height);
        world.for_each_with::<Pose, _>(|world, entity| {
            world.modify::<Pose>(entity, |pose| {
                if pose.x < 0.0 {
                    pose.x = width;
                } else if pose.x > width {
                    pose.x = 0.0;
                }
                if pose.y < 0.0 {
                    pose.y = height;
                } else if pose.y > height {
                    pose.y = 0.0;
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dot;
    impl Prefab for Dot {
        type Args = Pose;
        fn build(world: &mut World, entity: Entity, pose: Pose) {
            world.add(entity, pose);
        }
    }

    #[test]
    fn test_wraps_each_edge() {
        let mut world = World::new();
        let left = world.create::<Dot>(Pose::new(-1.0, 10.0, 0.0));
        let right = world.create::<Dot>(Pose::new(1281.0, 10.0, 0.0));
        let top = world.create::<Dot>(Pose::new(10.0, -5.0, 0.0));
        let bottom = world.create::<Dot>(Pose::new(10.0, 700.0, 0.0));
        let inside = world.create::<Dot>(Pose::new(640.0, 340.0, 0.0));
        let mut system = PositionalBoundarySystem::new(1280.0, 680.0);

        system.update(&mut world, &mut Commands::new(), 16.0);

        assert_eq!(world.read::<Pose>(left).unwrap().x, 1280.0);
        assert_eq!(world.read::<Pose>(right).unwrap().x, 0.0);
        assert_eq!(world.read::<Pose>(top).unwrap().y, 680.0);
        assert_eq!(world.read::<Pose>(bottom).unwrap().y, 0.0);
        assert_eq!(world.read::<Pose>(inside).unwrap(), Pose::new(640.0, 340.0, 0.0));
    }
}
