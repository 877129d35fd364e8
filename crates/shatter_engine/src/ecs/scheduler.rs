//! Deterministic system scheduling
//!
//! Systems run strictly in registration order, one after another, once per
//! tick. Commands queued by a system are applied before the next system
//! starts, so later systems observe earlier systems' writes and spawns
//! within the same tick.

use log::{debug, trace};

use super::{Commands, System, World};
use crate::foundation::time::FrameClock;
use crate::viewport::Viewport;
use crate::EngineError;

/// Ordered pipeline of systems driven by a wall-clock timer
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
    commands: Commands,
    clock: FrameClock,
    tick_count: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            commands: Commands::new(),
            clock: FrameClock::new(),
            tick_count: 0,
        }
    }

    /// Append a system to the end of the pipeline
    pub fn add_system(&mut self, system: impl System + 'static) -> &mut Self {
        debug!("Registered system #{}: {}", self.systems.len(), system.name());
        self.systems.push(Box::new(system));
        self
    }

    /// Names of the registered systems, in execution order
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Fail when there is nothing to run
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.systems.is_empty() {
            return Err(EngineError::EmptyPipeline);
        }
        Ok(())
    }

    /// Measure the time since the previous tick and run every system with it
    ///
    /// Returns the measured delta in milliseconds.
    pub fn tick(&mut self, world: &mut World) -> f64 {
        let delta_ms = self.clock.tick();
        self.run(world, delta_ms);
        delta_ms
    }

    /// Run every system once with a fixed delta
    pub fn run(&mut self, world: &mut World, delta_ms: f64) {
        for system in &mut self.systems {
            system.update(world, &mut self.commands, delta_ms);
            if !self.commands.is_empty() {
                trace!(
                    "{} queued {} commands",
                    system.name(),
                    self.commands.len()
                );
                world.apply(&mut self.commands);
            }
        }
        self.tick_count += 1;
    }

    /// Clear the viewport and let every system draw, in pipeline order
    pub fn draw(&self, world: &World, viewport: &mut dyn Viewport) {
        viewport.refresh();
        for system in &self.systems {
            system.draw(world, viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, Entity, Prefab};
    use crate::geometry::{Pose, Shape};
    use crate::viewport::{DrawCommand, RecordingViewport, Style};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct Counter(u32);
    impl Component for Counter {}

    struct Spark;
    impl Prefab for Spark {
        type Args = ();
        fn build(world: &mut World, entity: Entity, (): ()) {
            world.add(entity, Counter(0));
            world.add(entity, Pose::default());
            world.add(entity, Shape::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));
        }
    }

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl System for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn update(&mut self, _world: &mut World, _commands: &mut Commands, _delta_ms: f64) {
            self.log.borrow_mut().push(self.name);
        }
    }

    struct Spawner;
    impl System for Spawner {
        fn name(&self) -> &'static str {
            "Spawner"
        }

        fn update(&mut self, _world: &mut World, commands: &mut Commands, _delta_ms: f64) {
            commands.spawn::<Spark>(());
        }
    }

    struct Incrementer {
        seen: Rc<RefCell<usize>>,
    }

    impl System for Incrementer {
        fn name(&self) -> &'static str {
            "Incrementer"
        }

        fn update(&mut self, world: &mut World, _commands: &mut Commands, _delta_ms: f64) {
            *self.seen.borrow_mut() = world.count_with::<Counter>();
            world.for_each_with::<Counter, _>(|world, entity| {
                world.modify::<Counter>(entity, |counter| counter.0 += 1);
            });
        }

        fn draw(&self, world: &World, viewport: &mut dyn Viewport) {
            for entity in world.entities_with::<Shape>() {
                if let Some(shape) = world.read::<Shape>(entity) {
                    viewport.draw_shape(&shape.vertices, &Style::default());
                }
            }
        }
    }

    #[test]
    fn test_systems_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        for name in ["First", "Second", "Third"] {
            scheduler.add_system(Recorder {
                name,
                log: Rc::clone(&log),
            });
        }

        let mut world = World::new();
        scheduler.run(&mut world, 16.0);
        scheduler.run(&mut world, 16.0);

        assert_eq!(
            *log.borrow(),
            vec!["First", "Second", "Third", "First", "Second", "Third"]
        );
        assert_eq!(scheduler.tick_count(), 2);
        assert_eq!(scheduler.system_names(), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_spawns_visible_to_later_systems_same_tick() {
        let seen = Rc::new(RefCell::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Spawner);
        scheduler.add_system(Incrementer {
            seen: Rc::clone(&seen),
        });

        let mut world = World::new();
        scheduler.run(&mut world, 16.0);

        assert_eq!(*seen.borrow(), 1);
        let spark = world.first_of_kind::<Spark>().unwrap();
        assert_eq!(world.read::<Counter>(spark).unwrap().0, 1);
    }

    #[test]
    fn test_draw_refreshes_then_draws() {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Incrementer {
            seen: Rc::new(RefCell::new(0)),
        });
        let mut world = World::new();
        world.create::<Spark>(());

        let mut viewport = RecordingViewport::new();
        scheduler.draw(&world, &mut viewport);
        scheduler.draw(&world, &mut viewport);

        assert_eq!(viewport.refresh_count(), 2);
        assert_eq!(viewport.commands().len(), 1);
        assert!(matches!(viewport.commands()[0], DrawCommand::Shape { .. }));
    }

    #[test]
    fn test_empty_pipeline_is_rejected() {
        assert!(matches!(
            Scheduler::new().validate(),
            Err(EngineError::EmptyPipeline)
        ));
    }

    #[test]
    fn test_tick_measures_delta() {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Spawner);
        let mut world = World::new();
        assert_eq!(scheduler.tick(&mut world), 0.0);
        assert!(scheduler.tick(&mut world) >= 0.0);
        assert_eq!(world.count_of_kind::<Spark>(), 2);
    }
}
