//! Thrusters: acceleration, exhaust streams and the nozzle flair

use shatter_engine::geometry::transform;
use shatter_engine::prelude::*;

use crate::components::{Acceleration, Thruster, ThrusterState};
use crate::prefabs::{ThrustStream, ThrustStreamArgs};

/// Pushes firing entities along their heading and leaves exhaust behind
pub struct ThrusterSystem;

impl System for ThrusterSystem {
    fn name(&self) -> &'static str {
        "ThrusterSystem"
    }

    fn update(&mut self, world: &mut World, commands: &mut Commands, _delta_ms: f64) {
        world.for_each_with::<Thruster, _>(|world, entity| {
            let (Some(thruster), Some(pose)) = (world.read::<Thruster>(entity), world.read::<Pose>(entity)) else {
                return;
            };
            if thruster.state != ThrusterState::Accelerate {
                return;
            }

            let push = pose.heading() * thruster.thrust;
            world.modify::<Acceleration>(entity, |acceleration| {
                acceleration.x = push.x;
                acceleration.y = push.y;
            });

            if thruster.creates_stream {
                commands.spawn::<ThrustStream>(ThrustStreamArgs {
                    pose,
                    offset: thruster.offset,
                    length: thruster.length,
                    width: thruster.width,
                });
            }
        });
    }

    fn draw(&self, world: &World, viewport: &mut dyn Viewport) {
        let style = Style::outline(Colour::RED);
        for entity in world.entities_with::<Thruster>() {
            let (Some(thruster), Some(pose)) = (world.read::<Thruster>(entity), world.read::<Pose>(entity)) else {
                continue;
            };
            if thruster.state != ThrusterState::Accelerate {
                continue;
            }
            let flair = Shape::from_coords(&[
                (thruster.offset, -thruster.width / 2.0),
                (-thruster.length, 0.0),
                (thruster.offset, thruster.width / 2.0),
            ]);
            viewport.draw_line(&transform(&flair, &pose).vertices, &style);
        }
    }
}
