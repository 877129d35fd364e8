//! Game-specific components

use shatter_engine::foundation::math::Vec2;
use shatter_engine::prelude::*;

/// Linear and angular velocity
///
/// Linear parts are in units per second, `w` in radians per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// X speed
    pub x: f64,
    /// Y speed
    pub y: f64,
    /// Spin
    pub w: f64,
}

impl Component for Velocity {}

impl Velocity {
    /// Create a velocity
    pub fn new(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }

    /// Linear speed
    pub fn speed(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Linear and angular acceleration, per second squared
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    /// X acceleration
    pub x: f64,
    /// Y acceleration
    pub y: f64,
    /// Angular acceleration
    pub w: f64,
}

impl Component for Acceleration {}

/// Thruster firing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrusterState {
    /// Not firing
    #[default]
    Idle,
    /// Firing along the heading
    Accelerate,
}

/// Engine mounted at the back of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Thruster {
    /// Current state
    pub state: ThrusterState,
    /// Acceleration applied while firing, units per second squared
    pub thrust: f64,
    /// Local x of the nozzle
    pub offset: f64,
    /// Length of the exhaust
    pub length: f64,
    /// Width of the nozzle
    pub width: f64,
    /// Whether firing leaves a stream that carves asteroids
    pub creates_stream: bool,
}

impl Component for Thruster {}

/// Missile launcher state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LauncherState {
    /// Waiting for a fire request
    #[default]
    Idle,
    /// Fire as soon as the cooldown allows
    Fire,
}

/// Missile launcher with a cooldown
#[derive(Debug, Clone, PartialEq)]
pub struct MissileLauncher {
    /// Current state
    pub state: LauncherState,
    /// Minimum time between shots
    pub cooldown_ms: f64,
    /// Time since the last shot, capped at the cooldown
    pub timer_ms: f64,
}

impl Component for MissileLauncher {}

impl MissileLauncher {
    /// A launcher that is ready to fire
    pub fn ready(cooldown_ms: f64) -> Self {
        Self {
            state: LauncherState::Idle,
            cooldown_ms,
            timer_ms: cooldown_ms,
        }
    }

    /// Whether the cooldown has elapsed
    pub fn is_charged(&self) -> bool {
        self.timer_ms >= self.cooldown_ms
    }
}

/// Counts down and destroys its entity when time runs out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ephemeral {
    /// Time left to live
    pub remaining_ms: f64,
}

impl Component for Ephemeral {}

impl Ephemeral {
    /// Entity lives for `remaining_ms`
    pub fn new(remaining_ms: f64) -> Self {
        Self { remaining_ms }
    }
}

/// Entity is destroyed on contact with an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DestructibleHull;

impl Component for DestructibleHull {}

/// Entity's shape is cut out of any asteroid it touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BooleanAsteroidSubtractor;

impl Component for BooleanAsteroidSubtractor {}

/// One ring of an explosion's visual effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    /// Ring radius
    pub radius: f64,
    /// Spin in radians per second
    pub spin: f64,
    /// Outline colour
    pub colour: Colour,
}

/// Leaves an explosion behind when destroyed by gameplay
#[derive(Debug, Clone, PartialEq)]
pub struct Explosive {
    /// Radius of the area carved out of nearby asteroids
    pub blast_radius: f64,
    /// Visual rings spawned at the blast
    pub flashes: Vec<Flash>,
}

impl Component for Explosive {}

impl Explosive {
    /// A large blast with yellow and red rings
    pub fn large(radius: f64, spin: f64) -> Self {
        Self {
            blast_radius: radius,
            flashes: vec![
                Flash {
                    radius,
                    spin: -spin,
                    colour: Colour::YELLOW,
                },
                Flash {
                    radius: radius - 2.0,
                    spin,
                    colour: Colour::RED,
                },
            ],
        }
    }

    /// A small blast with yellow and blue rings
    pub fn small(radius: f64, spin: f64) -> Self {
        Self {
            blast_radius: radius,
            flashes: vec![
                Flash {
                    radius,
                    spin: -spin,
                    colour: Colour::YELLOW,
                },
                Flash {
                    radius: radius - 2.0,
                    spin,
                    colour: Colour::BLUE,
                },
            ],
        }
    }
}

/// Text drawn at the entity's pose
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Text
    pub text: String,
    /// Font size
    pub font_size: f64,
    /// Offset from the pose
    pub offset: Vec2,
}

impl Component for Label {}

/// Draw style of an entity's shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Style handed to the viewport
    pub style: Style,
}

impl Component for Appearance {}

/// Random autopilot for alien ships
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlienPilot {
    /// Time since the last decision
    pub timer_ms: f64,
}

impl Component for AlienPilot {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_launcher_starts_charged() {
        let launcher = MissileLauncher::ready(200.0);
        assert!(launcher.is_charged());
        assert_eq!(launcher.state, LauncherState::Idle);
    }

    #[test]
    fn test_explosive_rings() {
        let explosive = Explosive::large(200.0, 3.0);
        assert_eq!(explosive.flashes.len(), 2);
        assert_relative_eq!(explosive.flashes[1].radius, 198.0);
        assert_eq!(explosive.flashes[1].colour, Colour::RED);
        assert_relative_eq!(explosive.flashes[0].spin, -explosive.flashes[1].spin);
    }

    #[test]
    fn test_velocity_speed() {
        assert_relative_eq!(Velocity::new(3.0, 4.0, 0.0).speed(), 5.0);
    }
}
