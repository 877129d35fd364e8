//! Entity kinds and their component recipes

use std::f64::consts::{PI, TAU};

use rand::Rng;
use shatter_engine::foundation::math::{Point, Vec2};
use shatter_engine::geometry::regular_polygon;
use shatter_engine::prelude::*;

use crate::components::{
    Acceleration, AlienPilot, Appearance, BooleanAsteroidSubtractor, DestructibleHull, Ephemeral,
    Explosive, Flash, Label, LauncherState, MissileLauncher, Thruster, ThrusterState, Velocity,
};
use crate::config::AsteroidConfig;

/// Outline of the player ship, nose along +x
pub const SHIP_VERTICES: [(f64, f64); 4] = [(20.0, 0.0), (-10.0, -10.0), (0.0, 0.0), (-10.0, 10.0)];

const ALIEN_VERTICES: [(f64, f64); 7] = [
    (40.0, 0.0),
    (25.0, -5.0),
    (10.0, -20.0),
    (-10.0, -20.0),
    (-25.0, -5.0),
    (-40.0, 0.0),
    (0.0, 10.0),
];

const MISSILE_VERTICES: [(f64, f64); 3] = [(10.0, 0.0), (-10.0, -2.0), (-10.0, 2.0)];

/// Distance ahead of the launcher at which missiles appear
const MISSILE_MUZZLE_OFFSET: f64 = 30.0;

/// Spin of explosion rings, radians per second
pub const FLASH_SPIN: f64 = PI / 1024.0 * 1000.0;

const FLASH_LIFETIME_MS: f64 = 300.0;

/// Blast areas exist for a single tick
const BLAST_LIFETIME_MS: f64 = 1.0;

/// Player ship
pub struct Ship;

/// Ship construction parameters
#[derive(Debug, Clone, Copy)]
pub struct ShipArgs {
    /// Spawn pose
    pub pose: Pose,
    /// Thrust acceleration
    pub thrust: f64,
    /// Missile launcher cooldown
    pub launcher_cooldown_ms: f64,
}

impl Prefab for Ship {
    type Args = ShipArgs;

    fn build(world: &mut World, entity: Entity, args: ShipArgs) {
        world.add(entity, args.pose);
        world.add(entity, Shape::from_coords(&SHIP_VERTICES));
        world.add(entity, Velocity::default());
        world.add(entity, Acceleration::default());
        world.add(
            entity,
            Thruster {
                state: ThrusterState::Idle,
                thrust: args.thrust,
                offset: -10.0,
                length: 60.0,
                width: 10.0,
                creates_stream: true,
            },
        );
        world.add(entity, DestructibleHull);
        world.add(entity, MissileLauncher::ready(args.launcher_cooldown_ms));
        world.add(entity, Explosive::large(200.0, FLASH_SPIN));
    }
}

/// A destructible rock
pub struct Asteroid;

/// Asteroid construction parameters
#[derive(Debug, Clone)]
pub struct AsteroidArgs {
    /// Pose of the asteroid's local origin
    pub pose: Pose,
    /// Outline relative to the pose
    pub shape: Shape,
    /// Initial velocity
    pub velocity: Velocity,
}

impl Prefab for Asteroid {
    type Args = AsteroidArgs;

    fn build(world: &mut World, entity: Entity, args: AsteroidArgs) {
        world.add(entity, args.pose);
        world.add(entity, args.shape);
        world.add(entity, args.velocity);
    }
}

impl Asteroid {
    /// Random rocky outline: vertex `i` at angle `2πi/n`, radius
    /// `inner + outer * r` for a fresh random `r`
    pub fn random_shape(rng: &mut impl Rng, config: &AsteroidConfig) -> Shape {
        let count = config.vertices;
        Shape::new(
            (1..=count)
                .map(|i| {
                    let radius = config.inner_radius + config.outer_radius * rng.gen::<f64>();
                    let angle = TAU * i as f64 / count as f64;
                    Point::new(radius * angle.cos(), radius * angle.sin())
                })
                .collect(),
        )
    }

    /// Random drift and spin within the configured limits
    pub fn random_velocity(rng: &mut impl Rng, config: &AsteroidConfig) -> Velocity {
        Velocity::new(
            config.max_speed * (1.0 - 2.0 * rng.gen::<f64>()),
            config.max_speed * (1.0 - 2.0 * rng.gen::<f64>()),
            config.max_spin * (1.0 - 2.0 * rng.gen::<f64>()),
        )
    }

    /// Arguments for a freshly generated asteroid at `pose`
    pub fn generate(rng: &mut impl Rng, pose: Pose, config: &AsteroidConfig) -> AsteroidArgs {
        AsteroidArgs {
            pose,
            shape: Self::random_shape(rng, config),
            velocity: Self::random_velocity(rng, config),
        }
    }
}

/// Projectile fired by a missile launcher
pub struct Missile;

/// Missile construction parameters
#[derive(Debug, Clone, Copy)]
pub struct MissileArgs {
    /// Pose of the launcher
    pub launcher: Pose,
    /// Speed along the launcher heading
    pub speed: f64,
    /// Time before the missile self-destructs
    pub lifetime_ms: f64,
}

impl Prefab for Missile {
    type Args = MissileArgs;

    fn build(world: &mut World, entity: Entity, args: MissileArgs) {
        let heading = args.launcher.heading();
        let muzzle = args.launcher.position() + heading * MISSILE_MUZZLE_OFFSET;
        world.add(entity, Pose::new(muzzle.x, muzzle.y, args.launcher.a));
        world.add(
            entity,
            Velocity::new(heading.x * args.speed, heading.y * args.speed, 0.0),
        );
        world.add(entity, Shape::from_coords(&MISSILE_VERTICES));
        world.add(entity, DestructibleHull);
        world.add(entity, Ephemeral::new(args.lifetime_ms));
        world.add(
            entity,
            Thruster {
                state: ThrusterState::Accelerate,
                thrust: 0.0,
                offset: -10.0,
                length: 40.0,
                width: 2.0,
                creates_stream: false,
            },
        );
        world.add(entity, Explosive::small(50.0, FLASH_SPIN));
    }
}

/// Hostile ship flown by an [`AlienPilot`]
pub struct AlienShip;

/// Alien ship construction parameters
#[derive(Debug, Clone, Copy)]
pub struct AlienShipArgs {
    /// Spawn pose
    pub pose: Pose,
    /// Initial velocity
    pub velocity: Velocity,
    /// Missile launcher cooldown
    pub launcher_cooldown_ms: f64,
    /// Time before the ship leaves play
    pub lifetime_ms: f64,
}

impl Prefab for AlienShip {
    type Args = AlienShipArgs;

    fn build(world: &mut World, entity: Entity, args: AlienShipArgs) {
        world.add(entity, args.pose);
        world.add(entity, Shape::from_coords(&ALIEN_VERTICES));
        world.add(entity, args.velocity);
        world.add(entity, DestructibleHull);
        world.add(
            entity,
            MissileLauncher {
                state: LauncherState::Idle,
                cooldown_ms: args.launcher_cooldown_ms,
                timer_ms: args.launcher_cooldown_ms,
            },
        );
        world.add(entity, Ephemeral::new(args.lifetime_ms));
        world.add(entity, AlienPilot::default());
        world.add(entity, Explosive::large(200.0, FLASH_SPIN));
    }
}

/// Short-lived area that carves a blast out of asteroids
pub struct ExplosionArea;

/// Explosion area construction parameters
#[derive(Debug, Clone, Copy)]
pub struct ExplosionAreaArgs {
    /// Blast centre
    pub pose: Pose,
    /// Blast radius
    pub radius: f64,
}

impl Prefab for ExplosionArea {
    type Args = ExplosionAreaArgs;

    fn build(world: &mut World, entity: Entity, args: ExplosionAreaArgs) {
        world.add(entity, args.pose);
        world.add(entity, regular_polygon(args.radius, 10));
        world.add(entity, Ephemeral::new(BLAST_LIFETIME_MS));
        world.add(entity, BooleanAsteroidSubtractor);
    }
}

/// Spinning hexagon shown at an explosion
pub struct ExplosionVisual;

/// Explosion visual construction parameters
#[derive(Debug, Clone, Copy)]
pub struct ExplosionVisualArgs {
    /// Centre
    pub pose: Pose,
    /// Ring description
    pub flash: Flash,
}

impl Prefab for ExplosionVisual {
    type Args = ExplosionVisualArgs;

    fn build(world: &mut World, entity: Entity, args: ExplosionVisualArgs) {
        world.add(entity, args.pose);
        world.add(entity, regular_polygon(args.flash.radius, 6));
        world.add(entity, Velocity::new(0.0, 0.0, args.flash.spin));
        world.add(entity, Ephemeral::new(FLASH_LIFETIME_MS));
        world.add(
            entity,
            Appearance {
                style: Style::outline(args.flash.colour),
            },
        );
    }
}

/// Exhaust plume left behind by a firing thruster
pub struct ThrustStream;

/// Thrust stream construction parameters
#[derive(Debug, Clone, Copy)]
pub struct ThrustStreamArgs {
    /// Pose of the thrusting entity
    pub pose: Pose,
    /// Local x of the nozzle
    pub offset: f64,
    /// Exhaust length
    pub length: f64,
    /// Nozzle width
    pub width: f64,
}

impl Prefab for ThrustStream {
    type Args = ThrustStreamArgs;

    fn build(world: &mut World, entity: Entity, args: ThrustStreamArgs) {
        let (length, width) = (args.length, args.width);
        world.add(entity, args.pose);
        world.add(
            entity,
            Shape::from_coords(&[
                (args.offset, -width / 2.0),
                (-0.7 * length, -2.5 * width),
                (-1.2 * length, -1.2 * width),
                (-1.2 * length, 1.2 * width),
                (-0.7 * length, 2.5 * width),
                (args.offset, width / 2.0),
            ]),
        );
        world.add(entity, Ephemeral::new(BLAST_LIFETIME_MS));
        world.add(entity, BooleanAsteroidSubtractor);
    }
}

/// Free-standing text such as the start prompt
pub struct Prompt;

/// Prompt construction parameters
#[derive(Debug, Clone)]
pub struct PromptArgs {
    /// Anchor pose
    pub pose: Pose,
    /// Text shown
    pub text: String,
    /// Font size
    pub font_size: f64,
    /// Offset from the anchor
    pub offset: Vec2,
}

impl Prefab for Prompt {
    type Args = PromptArgs;

    fn build(world: &mut World, entity: Entity, args: PromptArgs) {
        world.add(entity, args.pose);
        world.add(
            entity,
            Label {
                text: args.text,
                font_size: args.font_size,
                offset: args.offset,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ship_recipe() {
        let mut world = World::new();
        let ship = world.create::<Ship>(ShipArgs {
            pose: Pose::new(640.0, 360.0, -PI / 2.0),
            thrust: 300.0,
            launcher_cooldown_ms: 200.0,
        });

        assert_eq!(world.read::<Shape>(ship).unwrap().len(), 4);
        assert!(world.has::<DestructibleHull>(ship));
        assert!(world.has::<Acceleration>(ship));
        assert_eq!(world.read::<Thruster>(ship).unwrap().state, ThrusterState::Idle);
        assert!(world.read::<MissileLauncher>(ship).unwrap().is_charged());
        assert_eq!(world.count_of_kind::<Ship>(), 1);
    }

    #[test]
    fn test_missile_spawns_ahead_of_launcher() {
        let mut world = World::new();
        let missile = world.create::<Missile>(MissileArgs {
            launcher: Pose::new(100.0, 100.0, 0.0),
            speed: 1000.0,
            lifetime_ms: 500.0,
        });

        let pose = world.read::<Pose>(missile).unwrap();
        assert_relative_eq!(pose.x, 130.0);
        assert_relative_eq!(pose.y, 100.0);
        let velocity = world.read::<Velocity>(missile).unwrap();
        assert_relative_eq!(velocity.x, 1000.0);
        assert_relative_eq!(velocity.y, 0.0);
        assert_relative_eq!(world.read::<Ephemeral>(missile).unwrap().remaining_ms, 500.0);
    }

    #[test]
    fn test_random_asteroid_within_radius_limits() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = AsteroidConfig::default();
        let args = Asteroid::generate(&mut rng, Pose::default(), &config);

        assert_eq!(args.shape.len(), config.vertices);
        for vertex in &args.shape.vertices {
            let radius = vertex.coords.norm();
            assert!(radius >= config.inner_radius - 1e-9);
            assert!(radius <= config.inner_radius + config.outer_radius + 1e-9);
        }
        assert!(args.velocity.x.abs() <= config.max_speed);
        assert!(args.velocity.w.abs() <= config.max_spin);
    }

    #[test]
    fn test_explosion_area_is_single_tick_subtractor() {
        let mut world = World::new();
        let area = world.create::<ExplosionArea>(ExplosionAreaArgs {
            pose: Pose::default(),
            radius: 50.0,
        });

        assert!(world.has::<BooleanAsteroidSubtractor>(area));
        assert_eq!(world.read::<Shape>(area).unwrap().len(), 10);
        assert_relative_eq!(world.read::<Ephemeral>(area).unwrap().remaining_ms, 1.0);
    }

    #[test]
    fn test_thrust_stream_shape() {
        let mut world = World::new();
        let stream = world.create::<ThrustStream>(ThrustStreamArgs {
            pose: Pose::default(),
            offset: -10.0,
            length: 60.0,
            width: 10.0,
        });

        let shape = world.read::<Shape>(stream).unwrap();
        assert_eq!(shape.len(), 6);
        assert_relative_eq!(shape.vertices[2].x, -72.0);
        assert_relative_eq!(shape.vertices[1].y, -25.0);
    }
}
