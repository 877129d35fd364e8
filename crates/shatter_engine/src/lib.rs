//! # Shatter Engine
//!
//! The simulation kernel behind a 2D arcade game with destructible polygon
//! bodies.
//!
//! ## Features
//!
//! - **ECS Architecture**: Entity-component store with per-type insertion-order indexes
//! - **Deterministic Scheduling**: Systems run in registration order once per tick
//! - **Polygon Geometry**: Transforms, hit tests, simplification and boolean difference
//! - **Deferred Tasks**: Session-scoped timers for game flow callbacks
//! - **Headless Boundaries**: Rendering and input reach the kernel through traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shatter_engine::prelude::*;
//!
//! #[derive(Debug, Clone)]
//! struct Spin(f64);
//! impl Component for Spin {}
//!
//! struct Rock;
//! impl Prefab for Rock {
//!     type Args = Pose;
//!     fn build(world: &mut World, entity: Entity, pose: Pose) {
//!         world.add(entity, pose);
//!         world.add(entity, Spin(0.5));
//!     }
//! }
//!
//! struct SpinSystem;
//! impl System for SpinSystem {
//!     fn name(&self) -> &'static str {
//!         "SpinSystem"
//!     }
//!
//!     fn update(&mut self, world: &mut World, _commands: &mut Commands, delta_ms: f64) {
//!         world.for_each_with::<Spin, _>(|world, entity| {
//!             if let (Some(spin), Some(mut pose)) = (world.read::<Spin>(entity), world.read::<Pose>(entity)) {
//!                 pose.a += spin.0 * delta_ms / 1000.0;
//!                 world.write(entity, pose);
//!             }
//!         });
//!     }
//! }
//!
//! let mut world = World::new();
//! world.create::<Rock>(Pose::new(10.0, 10.0, 0.0));
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(SpinSystem);
//! scheduler.run(&mut world, 16.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod geometry;
pub mod input;
pub mod viewport;

mod error;

pub use error::EngineError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig},
        ecs::{Commands, Component, Entity, Prefab, Scheduler, System, World},
        foundation::{
            deferred::{DeferredQueue, SessionToken},
            math::{Point, Vec2},
            time::{FrameClock, Pacer},
        },
        geometry::{Bounds, GeometryError, Pose, Shape},
        input::{InputEvent, InputQueue, KeyCode},
        viewport::{Colour, DrawCommand, RecordingViewport, Style, Viewport},
        EngineError,
    };
}
