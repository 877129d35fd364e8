//! Missile launchers

use shatter_engine::prelude::*;

use crate::components::{LauncherState, MissileLauncher};
use crate::prefabs::{Missile, MissileArgs};

/// Fires requested missiles once the cooldown allows
pub struct MissileLauncherSystem {
    missile_speed: f64,
    missile_lifetime_ms: f64,
}

impl MissileLauncherSystem {
    /// Launcher system firing missiles with the given speed and lifetime
    pub fn new(missile_speed: f64, missile_lifetime_ms: f64) -> Self {
        Self {
            missile_speed,
            missile_lifetime_ms,
        }
    }
}

impl System for MissileLauncherSystem {
    fn name(&self) -> &'static str {
        "MissileLauncherSystem"
    }

    fn update(&mut self, world: &mut World, commands: &mut Commands, delta_ms: f64) {
        for entity in world.entities_with::<MissileLauncher>() {
            let Some(mut launcher) = world.read::<MissileLauncher>(entity) else {
                continue;
            };
            let pose = world.read::<Pose>(entity);

            match pose {
                Some(pose) if launcher.state == LauncherState::Fire && launcher.is_charged() => {
                    commands.spawn::<Missile>(MissileArgs {
                        launcher: pose,
                        speed: self.missile_speed,
                        lifetime_ms: self.missile_lifetime_ms,
                    });
                    launcher.state = LauncherState::Idle;
                    launcher.timer_ms = 0.0;
                }
                _ => {
                    launcher.timer_ms = (launcher.timer_ms + delta_ms).min(launcher.cooldown_ms);
                }
            }
            world.write(entity, launcher);
        }
    }
}
