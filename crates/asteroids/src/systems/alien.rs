//! Alien ship autopilot

use rand::rngs::StdRng;
use rand::Rng;
use shatter_engine::prelude::*;

use crate::components::{AlienPilot, LauncherState, MissileLauncher, Velocity};
use crate::config::AlienConfig;

/// Gives every alien ship a random chance to swerve or shoot at a fixed
/// decision interval
pub struct AlienPilotSystem {
    config: AlienConfig,
    rng: StdRng,
}

impl AlienPilotSystem {
    /// Create the system with its own random source
    pub fn new(config: AlienConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    /// A random course within the configured swerve speed
    pub fn random_course(rng: &mut impl Rng, config: &AlienConfig) -> Velocity {
        Velocity::new(
            config.swerve_speed * (1.0 - 2.0 * rng.gen::<f64>()),
            config.swerve_speed * (1.0 - 2.0 * rng.gen::<f64>()),
            0.0,
        )
    }
}

impl System for AlienPilotSystem {
    fn name(&self) -> &'static str {
        "AlienPilotSystem"
    }

    fn update(&mut self, world: &mut World, _commands: &mut Commands, delta_ms: f64) {
        for alien in world.entities_with::<AlienPilot>() {
            let Some(mut pilot) = world.read::<AlienPilot>(alien) else {
                continue;
            };
            pilot.timer_ms += delta_ms;
            while pilot.timer_ms >= self.config.decision_interval_ms {
                pilot.timer_ms -= self.config.decision_interval_ms;
                if self.rng.gen_bool(self.config.swerve_chance) {
                    let course = Self::random_course(&mut self.rng, &self.config);
                    world.write(alien, course);
                }
                if self.rng.gen_bool(self.config.fire_chance) {
                    world.modify::<MissileLauncher>(alien, |launcher| {
                        launcher.state = LauncherState::Fire;
                    });
                }
            }
            world.write(alien, pilot);
        }
    }
}
