//! # Asteroids
//!
//! Asteroids with destructible polygon rocks, built on [`shatter_engine`].
//! Explosions and exhaust plumes are cut out of asteroids with a polygon
//! difference, so rocks crumble into irregular fragments instead of
//! splitting into fixed sizes.
//!
//! [`game::Game`] ties everything together: it owns the world, the per-tick
//! pipeline from [`game::build_scheduler`] and the
//! [`controllers::GameController`] that runs lives and levels.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod components;
pub mod config;
pub mod controllers;
pub mod fragmentation;
pub mod game;
pub mod hud;
pub mod prefabs;
pub mod systems;
