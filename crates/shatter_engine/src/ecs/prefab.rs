//! Prefabs: entity kinds with a fixed component recipe

use super::{Entity, World};

/// Blueprint for a kind of entity
///
/// The implementing type doubles as the entity's kind, so the world can
/// answer "all ships" or "how many asteroids" without a marker component.
pub trait Prefab: 'static {
    /// Construction parameters
    type Args;

    /// Attach the kind's components to a freshly created entity
    fn build(world: &mut World, entity: Entity, args: Self::Args);
}
