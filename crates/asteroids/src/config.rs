//! Game configuration

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use shatter_engine::config::{Config, ConfigError, EngineConfig};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the game's random number generators; random when unset
    pub seed: Option<u64>,

    /// Kernel settings
    pub engine: EngineConfig,

    /// Game flow settings
    pub gameplay: GameplayConfig,

    /// Player ship handling
    pub ship: ShipConfig,

    /// Asteroid generation
    pub asteroids: AsteroidConfig,

    /// Asteroid splitting
    pub fragmentation: FragmentationConfig,

    /// Alien ship behaviour
    pub alien: AlienConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Starting lives
    pub starting_lives: u32,

    /// Delay before the ship respawns after being destroyed
    pub respawn_delay_ms: f64,

    /// Delay before returning to the start screen after the last life
    pub game_over_delay_ms: f64,

    /// Delay before the next level once the field is clear
    pub next_level_delay_ms: f64,

    /// Asteroids must be at least this far from the spawn point
    pub safe_spawn_radius: f64,

    /// Retry interval while the spawn point is not clear
    pub safe_spawn_retry_ms: f64,

    /// Minimum distance between a new asteroid and the ship
    pub asteroid_clearance: f64,

    /// Extra asteroids on top of the level number
    pub extra_asteroids_per_level: u32,

    /// Text shown on the start screen
    pub start_prompt: String,

    /// Whether alien ships join the game
    pub aliens_enabled: bool,

    /// First level on which an alien ship appears
    pub alien_from_level: u32,
}

/// Ship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Thrust acceleration in units per second squared
    pub thrust: f64,

    /// Turn rate in radians per second
    pub turn_rate: f64,

    /// Minimum time between missiles
    pub launcher_cooldown_ms: f64,

    /// Missile speed in units per second
    pub missile_speed: f64,

    /// Missile lifetime
    pub missile_lifetime_ms: f64,
}

/// Asteroid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Radius every vertex reaches at least
    pub inner_radius: f64,

    /// Random extra radius per vertex
    pub outer_radius: f64,

    /// Vertex count of a new asteroid
    pub vertices: usize,

    /// Largest speed along each axis, in units per second
    pub max_speed: f64,

    /// Largest spin in radians per second
    pub max_spin: f64,
}

/// Fragmentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentationConfig {
    /// Simplification tolerance applied to every fragment
    pub simplify_tolerance: f64,

    /// Fragments narrower and shorter than this are discarded
    pub min_fragment_extent: f64,
}

/// Alien ship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    /// Time between pilot decisions
    pub decision_interval_ms: f64,

    /// Chance per decision of changing course
    pub swerve_chance: f64,

    /// Chance per decision of firing
    pub fire_chance: f64,

    /// Largest speed along each axis after a course change
    pub swerve_speed: f64,

    /// How long an alien ship stays in play
    pub lifetime_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            engine: EngineConfig::default(),
            gameplay: GameplayConfig::default(),
            ship: ShipConfig::default(),
            asteroids: AsteroidConfig::default(),
            fragmentation: FragmentationConfig::default(),
            alien: AlienConfig::default(),
        }
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            respawn_delay_ms: 1000.0,
            game_over_delay_ms: 2000.0,
            next_level_delay_ms: 3000.0,
            safe_spawn_radius: 100.0,
            safe_spawn_retry_ms: 500.0,
            asteroid_clearance: 300.0,
            extra_asteroids_per_level: 2,
            start_prompt: "Press SPACE to begin...".to_string(),
            aliens_enabled: true,
            alien_from_level: 2,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            thrust: 300.0,
            turn_rate: PI / 512.0 * 1000.0,
            launcher_cooldown_ms: 200.0,
            missile_speed: 1000.0,
            missile_lifetime_ms: 500.0,
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            inner_radius: 100.0,
            outer_radius: 100.0,
            vertices: 20,
            max_speed: 50.0,
            max_spin: PI / 4096.0 * 1000.0,
        }
    }
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            simplify_tolerance: 1.0,
            min_fragment_extent: 30.0,
        }
    }
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            decision_interval_ms: 100.0,
            swerve_chance: 0.1,
            fire_chance: 0.1,
            swerve_speed: 200.0,
            lifetime_ms: 10_000.0,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.asteroids.vertices < 3 {
            return Err(ConfigError::Invalid {
                field: "asteroids.vertices",
                reason: format!("need at least 3, got {}", self.asteroids.vertices),
            });
        }
        if self.fragmentation.simplify_tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "fragmentation.simplify_tolerance",
                reason: "must not be negative".to_string(),
            });
        }
        if self.alien.decision_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "alien.decision_interval_ms",
                reason: format!("must be positive, got {}", self.alien.decision_interval_ms),
            });
        }
        for (field, chance) in [
            ("alien.swerve_chance", self.alien.swerve_chance),
            ("alien.fire_chance", self.alien.fire_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a probability, got {chance}"),
                });
            }
        }
        Ok(())
    }
}
