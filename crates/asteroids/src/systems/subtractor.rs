//! Carving asteroids with subtractor shapes

use log::debug;
use rand::rngs::StdRng;
use shatter_engine::prelude::*;

use super::world_shape;
use crate::components::BooleanAsteroidSubtractor;
use crate::config::{AsteroidConfig, FragmentationConfig};
use crate::fragmentation::{fragment, is_hit, Outcome};
use crate::prefabs::{Asteroid, AsteroidArgs};

/// Cuts every subtractor's outline out of the asteroids it touches
///
/// The largest fragment stays on the original asteroid entity and keeps its
/// velocity. Smaller fragments become new asteroids with a fresh random
/// drift. Every subtractor is tested against every asteroid, so a later
/// subtractor cuts the outline left by an earlier one. Asteroids already
/// queued for destruction are skipped.
pub struct BooleanAsteroidSubtractorSystem {
    fragmentation: FragmentationConfig,
    asteroids: AsteroidConfig,
    rng: StdRng,
}

impl BooleanAsteroidSubtractorSystem {
    /// Create the system with its own random source for fragment drift
    pub fn new(fragmentation: FragmentationConfig, asteroids: AsteroidConfig, rng: StdRng) -> Self {
        Self {
            fragmentation,
            asteroids,
            rng,
        }
    }
}

impl System for BooleanAsteroidSubtractorSystem {
    fn name(&self) -> &'static str {
        "BooleanAsteroidSubtractorSystem"
    }

    fn update(&mut self, world: &mut World, commands: &mut Commands, _delta_ms: f64) {
        let subtractors = world.entities_with::<BooleanAsteroidSubtractor>();
        if subtractors.is_empty() {
            return;
        }
        let asteroids = world.entities_of_kind::<Asteroid>();

        for subtractor in subtractors {
            let Some(cutter) = world_shape(world, subtractor) else {
                continue;
            };
            for &asteroid in &asteroids {
                if commands.is_destroy_queued(asteroid) {
                    continue;
                }
                let Some(rock) = world_shape(world, asteroid) else {
                    continue;
                };
                if !is_hit(&rock, &cutter) {
                    continue;
                }
                match fragment(&rock, &cutter, &self.fragmentation) {
                    Outcome::Destroyed => {
                        debug!("{:?} consumed by {:?}", asteroid, subtractor);
                        commands.destroy(asteroid);
                    }
                    Outcome::Fragmented(fragments) => {
                        debug!(
                            "{:?} split into {} fragments by {:?}",
                            asteroid,
                            fragments.len(),
                            subtractor
                        );
                        let mut fragments = fragments.into_iter();
                        if let Some(largest) = fragments.next() {
                            world.write(asteroid, largest.pose);
                            world.write(asteroid, largest.shape);
                        }
                        for piece in fragments {
                            commands.spawn::<Asteroid>(AsteroidArgs {
                                pose: piece.pose,
                                shape: piece.shape,
                                velocity: Asteroid::random_velocity(&mut self.rng, &self.asteroids),
                            });
                        }
                    }
                }
            }
        }
    }
}
