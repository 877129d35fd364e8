//! Deferred structural changes
//!
//! Systems queue spawns and destroys here while iterating. The scheduler
//! applies the queue after each system returns, so the next system in the
//! same tick already sees the result.

use super::{Entity, Prefab, World};

type SpawnFn = Box<dyn FnOnce(&mut World) -> Entity>;

pub(crate) enum Command {
    Spawn(SpawnFn),
    Destroy(Entity),
}

/// Queue of spawns and destroys waiting to be applied to a [`World`]
#[derive(Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue creation of a `P` entity
    pub fn spawn<P: Prefab>(&mut self, args: P::Args)
    where
        P::Args: 'static,
    {
        self.queue
            .push(Command::Spawn(Box::new(move |world| world.create::<P>(args))));
    }

    /// Queue destruction of an entity; destroying a missing entity is a no-op
    pub fn destroy(&mut self, entity: Entity) {
        self.queue.push(Command::Destroy(entity));
    }

    /// Whether `entity` already has a destroy queued
    pub fn is_destroy_queued(&self, entity: Entity) -> bool {
        self.queue
            .iter()
            .any(|command| matches!(command, Command::Destroy(queued) if *queued == entity))
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.queue.drain(..)
    }
}

impl std::fmt::Debug for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Commands")
            .field("queued", &self.queue.len())
            .finish()
    }
}
