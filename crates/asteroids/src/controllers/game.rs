//! Lives, levels and the flow between start screen and play

use std::f64::consts::PI;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use shatter_engine::foundation::math::Vec2;
use shatter_engine::prelude::*;

use super::input::{InputAction, InputMode};
use super::ship::ShipController;
use crate::config::GameConfig;
use crate::prefabs::{AlienShip, AlienShipArgs, Asteroid, Prompt, PromptArgs};
use crate::systems::AlienPilotSystem;

/// Attempts at finding an asteroid position clear of the ship
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

const PROMPT_FONT_SIZE: f64 = 40.0;
const PROMPT_OFFSET_X: f64 = -200.0;

/// Work the controller schedules for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTask {
    /// Return to the start screen
    Reset,
    /// Bring the ship back once its spawn point is clear
    RespawnShip,
    /// Populate the next level
    NextLevel,
}

/// Drives a game from the start screen through levels to game over
pub struct GameController {
    config: GameConfig,
    ship: ShipController,
    rng: StdRng,
    tasks: DeferredQueue<GameTask>,
    mode: InputMode,
    started: bool,
    waiting_to_respawn: bool,
    waiting_for_level: bool,
    level: u32,
    lives: u32,
}

impl GameController {
    /// Create a controller; call [`GameController::init`] before use
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        let ship = ShipController::new(config.ship.clone());
        let lives = config.gameplay.starting_lives;
        Self {
            config,
            ship,
            rng,
            tasks: DeferredQueue::new(),
            mode: InputMode::Setup,
            started: false,
            waiting_to_respawn: false,
            waiting_for_level: false,
            level: 0,
            lives,
        }
    }

    /// Show the start screen and wait for the start key
    pub fn init(&mut self, world: &mut World) {
        self.tasks.invalidate();
        self.started = false;
        self.waiting_to_respawn = false;
        self.waiting_for_level = false;
        self.level = 0;
        self.lives = self.config.gameplay.starting_lives;
        self.mode = InputMode::Setup;

        let (x, y) = self.centre();
        world.create::<Prompt>(PromptArgs {
            pose: Pose::new(x, y, 0.0),
            text: self.config.gameplay.start_prompt.clone(),
            font_size: PROMPT_FONT_SIZE,
            offset: Vec2::new(PROMPT_OFFSET_X, 0.0),
        });
        info!("Waiting for player to start");
    }

    /// Clear the field and begin level one
    pub fn start(&mut self, world: &mut World) {
        self.tasks.invalidate();
        world.clear();
        self.spawn_ship_when_safe(world);
        self.next_level(world);
        self.mode = InputMode::Ship;
        self.started = true;
        info!("Game started with {} lives", self.lives);
    }

    /// Per-tick check for a lost ship or a cleared level
    pub fn once(&mut self, world: &World) {
        if !self.started {
            return;
        }
        if self.ship.ship(world).is_none() && !self.waiting_to_respawn {
            self.waiting_to_respawn = true;
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                info!("Game over at level {}", self.level);
                self.tasks
                    .schedule(self.config.gameplay.game_over_delay_ms, GameTask::Reset);
            } else {
                info!("Ship lost, {} lives remaining", self.lives);
                self.tasks
                    .schedule(self.config.gameplay.respawn_delay_ms, GameTask::RespawnShip);
            }
            return;
        }
        if world.count_of_kind::<Asteroid>() == 0 && !self.waiting_for_level {
            self.waiting_for_level = true;
            info!("Level {} cleared", self.level);
            self.tasks
                .schedule(self.config.gameplay.next_level_delay_ms, GameTask::NextLevel);
        }
    }

    /// Let time pass for scheduled work and run whatever falls due
    ///
    /// A task that starts a new session stops the rest of the batch.
    pub fn advance(&mut self, world: &mut World, delta_ms: f64) {
        let session = self.tasks.session();
        for task in self.tasks.advance(delta_ms) {
            if self.tasks.session() != session {
                break;
            }
            self.run_task(world, task);
        }
    }

    /// React to one input event under the active bindings
    pub fn handle_input(&mut self, world: &mut World, event: InputEvent) {
        let Some(action) = self.mode.map(&event) else {
            return;
        };
        match action {
            InputAction::Start => self.start(world),
            InputAction::Accelerate => self.ship.accelerate(world),
            InputAction::Idle => self.ship.idle(world),
            InputAction::TurnLeft => self.ship.turn_left(world),
            InputAction::TurnRight => self.ship.turn_right(world),
            InputAction::StopTurningLeft => self.ship.stop_turning_left(world),
            InputAction::StopTurningRight => self.ship.stop_turning_right(world),
            InputAction::Shoot => self.ship.shoot(world),
        }
    }

    /// Lives left, including the ship in play
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Current level; zero before the first start
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether a game is in progress
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Active key bindings
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Number of scheduled tasks still waiting
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Ship commands
    pub fn ship(&self) -> &ShipController {
        &self.ship
    }

    fn run_task(&mut self, world: &mut World, task: GameTask) {
        debug!("Running deferred {task:?}");
        match task {
            GameTask::Reset => self.init(world),
            GameTask::RespawnShip => self.spawn_ship_when_safe(world),
            GameTask::NextLevel => self.next_level(world),
        }
    }

    fn centre(&self) -> (f64, f64) {
        (
            self.config.engine.viewport_width / 2.0,
            self.config.engine.viewport_height / 2.0,
        )
    }

    fn spawn_ship_when_safe(&mut self, world: &mut World) {
        let (x, y) = self.centre();
        let spawn = Pose::new(x, y, 0.0);
        let radius = self.config.gameplay.safe_spawn_radius;
        let blocked = world
            .entities_of_kind::<Asteroid>()
            .into_iter()
            .filter_map(|asteroid| world.read::<Pose>(asteroid))
            .any(|pose| pose.distance_to(&spawn) < radius);
        if blocked {
            debug!("Spawn point occupied, retrying");
            self.tasks
                .schedule(self.config.gameplay.safe_spawn_retry_ms, GameTask::RespawnShip);
            return;
        }
        self.waiting_to_respawn = false;
        self.ship.spawn(world, x, y);
    }

    fn next_level(&mut self, world: &mut World) {
        self.level += 1;
        let count = self.level + self.config.gameplay.extra_asteroids_per_level;
        for _ in 0..count {
            self.spawn_asteroid_away_from_ship(world);
        }
        let gameplay = &self.config.gameplay;
        if gameplay.aliens_enabled && self.level >= gameplay.alien_from_level {
            self.spawn_alien_at_random_edge(world);
        }
        self.waiting_for_level = false;
        info!("Level {} started with {} asteroids", self.level, count);
    }

    fn spawn_asteroid_away_from_ship(&mut self, world: &mut World) {
        let (cx, cy) = self.centre();
        let anchor = self
            .ship
            .ship(world)
            .and_then(|ship| world.read::<Pose>(ship))
            .unwrap_or_else(|| Pose::new(cx, cy, 0.0));
        let (width, height) = (
            self.config.engine.viewport_width,
            self.config.engine.viewport_height,
        );

        let mut pose = self.random_pose(width, height);
        let mut attempts = 1;
        while pose.distance_to(&anchor) < self.config.gameplay.asteroid_clearance
            && attempts < MAX_PLACEMENT_ATTEMPTS
        {
            pose = self.random_pose(width, height);
            attempts += 1;
        }
        if attempts == MAX_PLACEMENT_ATTEMPTS {
            debug!("No clear asteroid position after {attempts} attempts");
        }

        let args = Asteroid::generate(&mut self.rng, pose, &self.config.asteroids);
        world.create::<Asteroid>(args);
    }

    fn spawn_alien_at_random_edge(&mut self, world: &mut World) {
        let from_left = self.rng.gen_bool(0.5);
        let width = self.config.engine.viewport_width;
        let y = self.config.engine.viewport_height * self.rng.gen::<f64>();
        let (x, a) = if from_left { (1.0, 0.0) } else { (width - 1.0, PI) };
        let velocity = AlienPilotSystem::random_course(&mut self.rng, &self.config.alien);
        world.create::<AlienShip>(AlienShipArgs {
            pose: Pose::new(x, y, a),
            velocity,
            launcher_cooldown_ms: self.config.ship.launcher_cooldown_ms,
            lifetime_ms: self.config.alien.lifetime_ms,
        });
        info!("Alien ship entering at ({x:.0}, {y:.0})");
    }

    fn random_pose(&mut self, width: f64, height: f64) -> Pose {
        Pose::new(
            width * self.rng.gen::<f64>(),
            height * self.rng.gen::<f64>(),
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Label;
    use crate::prefabs::Ship;
    use rand::SeedableRng;

    fn controller() -> (World, GameController) {
        let mut config = GameConfig::default();
        config.gameplay.aliens_enabled = false;
        let mut world = World::new();
        let mut controller = GameController::new(config, StdRng::seed_from_u64(42));
        controller.init(&mut world);
        (world, controller)
    }

    #[test]
    fn test_init_shows_prompt() {
        let (world, controller) = controller();
        assert_eq!(controller.lives(), 3);
        assert_eq!(controller.level(), 0);
        assert_eq!(controller.mode(), InputMode::Setup);
        assert_eq!(world.count_with::<Label>(), 1);
        assert_eq!(world.count_of_kind::<Ship>(), 0);
    }

    #[test]
    fn test_space_release_starts_level_one() {
        let (mut world, mut controller) = controller();
        controller.handle_input(&mut world, InputEvent::KeyUp(KeyCode::Space));

        assert!(controller.is_started());
        assert_eq!(controller.level(), 1);
        assert_eq!(controller.mode(), InputMode::Ship);
        assert_eq!(world.count_with::<Label>(), 0);
        assert_eq!(world.count_of_kind::<Ship>(), 1);
        assert_eq!(world.count_of_kind::<Asteroid>(), 3);
    }

    #[test]
    fn test_asteroids_keep_clear_of_ship() {
        let (mut world, mut controller) = controller();
        controller.start(&mut world);
        let ship = world.first_of_kind::<Ship>().unwrap();
        let ship_pose = world.read::<Pose>(ship).unwrap();
        for asteroid in world.entities_of_kind::<Asteroid>() {
            let pose = world.read::<Pose>(asteroid).unwrap();
            assert!(pose.distance_to(&ship_pose) >= 300.0);
        }
    }

    #[test]
    fn test_ship_loss_schedules_one_respawn() {
        let (mut world, mut controller) = controller();
        controller.start(&mut world);
        let ship = world.first_of_kind::<Ship>().unwrap();
        world.destroy(ship);

        controller.once(&world);
        controller.once(&world);
        assert_eq!(controller.lives(), 2);
        assert_eq!(controller.pending_tasks(), 1);
    }

    #[test]
    fn test_alien_joins_from_second_level() {
        let mut world = World::new();
        let mut controller = GameController::new(GameConfig::default(), StdRng::seed_from_u64(3));
        controller.init(&mut world);
        controller.start(&mut world);
        assert_eq!(world.count_of_kind::<AlienShip>(), 0);

        for asteroid in world.entities_of_kind::<Asteroid>() {
            world.destroy(asteroid);
        }
        controller.once(&world);
        controller.advance(&mut world, 3000.0);

        assert_eq!(controller.level(), 2);
        assert_eq!(world.count_of_kind::<AlienShip>(), 1);
        assert_eq!(world.count_of_kind::<Asteroid>(), 4);
    }
}
