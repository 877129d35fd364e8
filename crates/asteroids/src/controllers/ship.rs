//! Player ship commands

use std::f64::consts::FRAC_PI_2;

use log::info;
use shatter_engine::prelude::*;

use crate::components::{
    Acceleration, LauncherState, MissileLauncher, Thruster, ThrusterState, Velocity,
};
use crate::config::ShipConfig;
use crate::prefabs::{Ship, ShipArgs};

/// Translates pilot intents into component changes on the player ship
///
/// Every command is a no-op while no ship is in play.
#[derive(Debug, Clone)]
pub struct ShipController {
    config: ShipConfig,
}

impl ShipController {
    /// Create a controller using the given ship handling
    pub fn new(config: ShipConfig) -> Self {
        Self { config }
    }

    /// The ship currently in play
    pub fn ship(&self, world: &World) -> Option<Entity> {
        world.first_of_kind::<Ship>()
    }

    /// Spawn a ship at `(x, y)` pointing up the screen
    pub fn spawn(&self, world: &mut World, x: f64, y: f64) -> Entity {
        let ship = world.create::<Ship>(ShipArgs {
            pose: Pose::new(x, y, -FRAC_PI_2),
            thrust: self.config.thrust,
            launcher_cooldown_ms: self.config.launcher_cooldown_ms,
        });
        info!("Ship spawned at ({x}, {y})");
        ship
    }

    /// Fire the main thruster
    pub fn accelerate(&self, world: &mut World) {
        if let Some(ship) = self.ship(world) {
            world.modify::<Thruster>(ship, |thruster| thruster.state = ThrusterState::Accelerate);
        }
    }

    /// Cut the thruster and drop any acceleration
    pub fn idle(&self, world: &mut World) {
        if let Some(ship) = self.ship(world) {
            world.write(ship, Acceleration::default());
            world.modify::<Thruster>(ship, |thruster| thruster.state = ThrusterState::Idle);
        }
    }

    /// Start turning anticlockwise on screen
    pub fn turn_left(&self, world: &mut World) {
        self.set_spin(world, -self.config.turn_rate);
    }

    /// Start turning clockwise on screen
    pub fn turn_right(&self, world: &mut World) {
        self.set_spin(world, self.config.turn_rate);
    }

    /// Stop a left turn; a right turn in progress is kept
    pub fn stop_turning_left(&self, world: &mut World) {
        if let Some(ship) = self.ship(world) {
            world.modify::<Velocity>(ship, |velocity| {
                if velocity.w < 0.0 {
                    velocity.w = 0.0;
                }
            });
        }
    }

    /// Stop a right turn; a left turn in progress is kept
    pub fn stop_turning_right(&self, world: &mut World) {
        if let Some(ship) = self.ship(world) {
            world.modify::<Velocity>(ship, |velocity| {
                if velocity.w > 0.0 {
                    velocity.w = 0.0;
                }
            });
        }
    }

    /// Ask the launcher to fire on its next charged tick
    pub fn shoot(&self, world: &mut World) {
        if let Some(ship) = self.ship(world) {
            world.modify::<MissileLauncher>(ship, |launcher| launcher.state = LauncherState::Fire);
        }
    }

    fn set_spin(&self, world: &mut World, w: f64) {
        if let Some(ship) = self.ship(world) {
            world.modify::<Velocity>(ship, |velocity| velocity.w = w);
        }
    }
}
