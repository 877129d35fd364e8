//! Game assembly: world, pipeline and controller wired together

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shatter_engine::prelude::*;

use crate::config::GameConfig;
use crate::controllers::GameController;
use crate::hud;
use crate::systems::{
    AccelerationSystem, AlienPilotSystem, BooleanAsteroidSubtractorSystem,
    DestructibleHullSystem, EphemeralSystem, LabelRenderSystem, MissileLauncherSystem,
    PositionalBoundarySystem, ShapeRenderSystem, ThrusterSystem, VelocitySystem,
};

/// Build the per-tick pipeline in execution order
///
/// Systems that need randomness get their own generator seeded from `rng`,
/// so a fixed game seed reproduces the whole run.
pub fn build_scheduler(config: &GameConfig, rng: &mut StdRng) -> Scheduler {
    let mut scheduler = Scheduler::new();
    scheduler
        .add_system(ThrusterSystem)
        .add_system(AccelerationSystem)
        .add_system(VelocitySystem)
        .add_system(PositionalBoundarySystem::new(
            config.engine.viewport_width,
            config.engine.viewport_height,
        ))
        .add_system(DestructibleHullSystem)
        .add_system(BooleanAsteroidSubtractorSystem::new(
            config.fragmentation.clone(),
            config.asteroids.clone(),
            StdRng::seed_from_u64(rng.gen()),
        ))
        .add_system(MissileLauncherSystem::new(
            config.ship.missile_speed,
            config.ship.missile_lifetime_ms,
        ))
        .add_system(EphemeralSystem)
        .add_system(AlienPilotSystem::new(
            config.alien.clone(),
            StdRng::seed_from_u64(rng.gen()),
        ))
        .add_system(ShapeRenderSystem)
        .add_system(LabelRenderSystem);
    scheduler
}

/// A running game
pub struct Game {
    config: GameConfig,
    world: World,
    scheduler: Scheduler,
    controller: GameController,
    input: InputQueue,
}

impl Game {
    /// Validate the configuration, build the pipeline and show the start
    /// screen
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let scheduler = build_scheduler(&config, &mut rng);
        scheduler.validate()?;
        debug!("Pipeline: {}", scheduler.system_names().join(" -> "));

        let mut world = World::new();
        let mut controller =
            GameController::new(config.clone(), StdRng::seed_from_u64(rng.gen()));
        controller.init(&mut world);
        info!("Game ready (seed {:?})", config.seed);

        Ok(Self {
            config,
            world,
            scheduler,
            controller,
            input: InputQueue::new(),
        })
    }

    /// Queue an input event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one tick with the wall-clock time since the previous one
    ///
    /// Returns the delta used.
    pub fn update(&mut self) -> f64 {
        self.drain_input();
        let delta_ms = self.scheduler.tick(&mut self.world);
        self.after_tick(delta_ms);
        delta_ms
    }

    /// Run one tick with a fixed delta
    pub fn step(&mut self, delta_ms: f64) {
        self.drain_input();
        self.scheduler.run(&mut self.world, delta_ms);
        self.after_tick(delta_ms);
    }

    /// Draw the world and the HUD
    pub fn draw(&self, viewport: &mut dyn Viewport) {
        self.scheduler.draw(&self.world, viewport);
        if self.controller.is_started() {
            hud::draw_remaining_lives(viewport, self.controller.lives());
        }
    }

    /// The entity store
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the entity store
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Lives, levels and game flow
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// The per-tick pipeline
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Configuration the game was built with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn drain_input(&mut self) {
        for event in self.input.drain() {
            self.controller.handle_input(&mut self.world, event);
        }
    }

    fn after_tick(&mut self, delta_ms: f64) {
        self.controller.advance(&mut self.world, delta_ms);
        self.controller.once(&self.world);
    }
}
