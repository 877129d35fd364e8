//! Entity-Component-System implementation
//!
//! Entities are versioned keys, so a destroyed entity's identity is never
//! handed out again. Components live in one storage per type, and each
//! storage doubles as the index of entities holding that type, ordered by
//! when the component was first added.

pub mod commands;
pub mod component;
pub mod entity;
pub mod prefab;
pub mod scheduler;
pub mod system;
pub mod world;

mod storage;

pub use commands::Commands;
pub use component::Component;
pub use entity::Entity;
pub use prefab::Prefab;
pub use scheduler::Scheduler;
pub use system::System;
pub use world::World;
