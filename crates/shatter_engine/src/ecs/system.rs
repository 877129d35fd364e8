//! System trait

use super::{Commands, World};
use crate::viewport::Viewport;

/// A unit of per-tick game logic
///
/// Systems read and write components through the [`World`] and queue
/// structural changes through [`Commands`]. A system may also contribute to
/// the draw pass, which only reads the world.
pub trait System {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Advance the system by `delta_ms` milliseconds
    fn update(&mut self, world: &mut World, commands: &mut Commands, delta_ms: f64) {
        let _ = (world, commands, delta_ms);
    }

    /// Emit draw calls for the current state
    fn draw(&self, world: &World, viewport: &mut dyn Viewport) {
        let _ = (world, viewport);
    }
}
