//! ECS World implementation

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use log::trace;
use slotmap::SlotMap;

use super::commands::{Command, Commands};
use super::storage::{AnyStorage, ComponentStorage};
use super::{Component, Entity, Prefab};

#[derive(Debug)]
struct EntityRecord {
    kind: TypeId,
    kind_name: &'static str,
    components: Vec<TypeId>,
}

/// ECS World containing all entities and components
///
/// Component access is by value: [`World::read`] returns a copy and
/// [`World::write`] replaces the stored value. Iteration helpers snapshot
/// the index first, so systems may add, remove or destroy while iterating.
#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, EntityRecord>,
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,
    kinds: HashMap<TypeId, Vec<Entity>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity of kind `P` and run its recipe
    pub fn create<P: Prefab>(&mut self, args: P::Args) -> Entity {
        let kind = TypeId::of::<P>();
        let entity = self.entities.insert(EntityRecord {
            kind,
            kind_name: short_name(type_name::<P>()),
            components: Vec::new(),
        });
        self.kinds.entry(kind).or_default().push(entity);
        P::build(self, entity, args);
        trace!("Created {} {:?}", short_name(type_name::<P>()), entity);
        entity
    }

    /// Destroy an entity and every component it owns
    ///
    /// Returns `false` when the entity was already gone.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        let Some(record) = self.entities.remove(entity) else {
            return false;
        };
        for component in &record.components {
            if let Some(storage) = self.storages.get_mut(component) {
                storage.remove_entity(entity);
            }
        }
        if let Some(members) = self.kinds.get_mut(&record.kind) {
            members.retain(|&member| member != entity);
        }
        trace!("Destroyed {} {:?}", record.kind_name, entity);
        true
    }

    /// Destroy every entity
    pub fn clear(&mut self) {
        let count = self.entities.len();
        self.entities.clear();
        self.storages.clear();
        self.kinds.clear();
        trace!("Cleared {} entities", count);
    }

    /// Whether the entity still exists
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Kind name the entity was created with
    pub fn kind_name(&self, entity: Entity) -> Option<&'static str> {
        self.entities.get(entity).map(|record| record.kind_name)
    }

    /// Whether the entity was created from prefab `P`
    pub fn is_kind<P: Prefab>(&self, entity: Entity) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|record| record.kind == TypeId::of::<P>())
    }

    /// Attach a component, overwriting any existing one of the same type
    ///
    /// Returns `false` when the entity does not exist.
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        let Some(record) = self.entities.get_mut(entity) else {
            return false;
        };
        let type_id = TypeId::of::<T>();
        if !record.components.contains(&type_id) {
            record.components.push(type_id);
        }
        self.storage_mut::<T>().insert(entity, component);
        true
    }

    /// Detach a component, returning it if it was present
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let removed = self.storage_mut_if_present::<T>()?.remove(entity)?;
        if let Some(record) = self.entities.get_mut(entity) {
            record.components.retain(|&id| id != TypeId::of::<T>());
        }
        Some(removed)
    }

    /// Copy of the entity's component
    pub fn read<T: Component>(&self, entity: Entity) -> Option<T> {
        self.storage::<T>()?.get(entity).cloned()
    }

    /// Replace the entity's component
    ///
    /// Does nothing and returns `false` when the component is absent; use
    /// [`World::add`] to attach a new one.
    pub fn write<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        match self
            .storage_mut_if_present::<T>()
            .and_then(|storage| storage.get_mut(entity))
        {
            Some(slot) => {
                *slot = component;
                true
            }
            None => false,
        }
    }

    /// Update a component in place
    ///
    /// Returns `false` when the component is absent.
    pub fn modify<T: Component>(&mut self, entity: Entity, update: impl FnOnce(&mut T)) -> bool {
        match self
            .storage_mut_if_present::<T>()
            .and_then(|storage| storage.get_mut(entity))
        {
            Some(slot) => {
                update(slot);
                true
            }
            None => false,
        }
    }

    /// Whether the entity has a component of type `T`
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>()
            .is_some_and(|storage| storage.contains(entity))
    }

    /// Snapshot of the entities holding `T`, in insertion order
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        let entities = self
            .storage::<T>()
            .map(|storage| storage.entities().to_vec())
            .unwrap_or_default();
        self.debug_assert_live(&entities, type_name::<T>());
        entities
    }

    /// Number of entities holding `T`
    pub fn count_with<T: Component>(&self) -> usize {
        self.storages
            .get(&TypeId::of::<T>())
            .map_or(0, |storage| storage.len())
    }

    /// Visit every entity holding `T`
    ///
    /// The index is snapshotted up front. Entities destroyed or stripped of
    /// `T` during the pass are skipped; entities gaining `T` during the pass
    /// are not visited.
    pub fn for_each_with<T: Component, F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Self, Entity),
    {
        for entity in self.entities_with::<T>() {
            if self.has::<T>(entity) {
                visit(self, entity);
            }
        }
    }

    /// Snapshot of the live entities of kind `P`, in creation order
    pub fn entities_of_kind<P: Prefab>(&self) -> Vec<Entity> {
        let entities = self
            .kinds
            .get(&TypeId::of::<P>())
            .cloned()
            .unwrap_or_default();
        self.debug_assert_live(&entities, type_name::<P>());
        entities
    }

    /// Visit every live entity of kind `P`, with the same snapshot rules as
    /// [`World::for_each_with`]
    pub fn for_each_of_kind<P: Prefab, F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Self, Entity),
    {
        for entity in self.entities_of_kind::<P>() {
            if self.is_alive(entity) {
                visit(self, entity);
            }
        }
    }

    /// Number of live entities of kind `P`
    pub fn count_of_kind<P: Prefab>(&self) -> usize {
        self.kinds.get(&TypeId::of::<P>()).map_or(0, Vec::len)
    }

    /// Oldest live entity of kind `P`
    pub fn first_of_kind<P: Prefab>(&self) -> Option<Entity> {
        self.kinds
            .get(&TypeId::of::<P>())
            .and_then(|members| members.first().copied())
    }

    /// Apply queued commands in the order they were issued
    pub fn apply(&mut self, commands: &mut Commands) {
        for command in commands.drain() {
            match command {
                Command::Spawn(spawn) => {
                    spawn(self);
                }
                Command::Destroy(entity) => {
                    if !self.destroy(entity) {
                        trace!("Skipped destroy of missing entity {:?}", entity);
                    }
                }
            }
        }
    }

    fn debug_assert_live(&self, entities: &[Entity], index: &str) {
        debug_assert!(
            entities.iter().all(|&entity| self.entities.contains_key(entity)),
            "{index} index references a destroyed entity"
        );
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref())
    }

    fn storage_mut_if_present<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut())
    }

    fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::default()) as Box<dyn AnyStorage>);
        debug_assert!(storage.as_any().is::<ComponentStorage<T>>());
        match storage.as_any_mut().downcast_mut() {
            Some(typed) => typed,
            None => unreachable!("storage registered under the wrong type id"),
        }
    }
}

fn short_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pose;

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity(f64, f64);
    impl Component for Velocity {}

    #[derive(Debug, Clone, PartialEq)]
    struct Tag;
    impl Component for Tag {}

    struct Rock;
    impl Prefab for Rock {
        type Args = Pose;
        fn build(world: &mut World, entity: Entity, pose: Pose) {
            world.add(entity, pose);
            world.add(entity, Velocity(1.0, 0.0));
        }
    }

    struct Marker;
    impl Prefab for Marker {
        type Args = ();
        fn build(world: &mut World, entity: Entity, (): ()) {
            world.add(entity, Tag);
        }
    }

    #[test]
    fn test_create_and_read() {
        let mut world = World::new();
        let rock = world.create::<Rock>(Pose::new(1.0, 2.0, 0.0));

        assert!(world.is_alive(rock));
        assert_eq!(world.read::<Pose>(rock), Some(Pose::new(1.0, 2.0, 0.0)));
        assert_eq!(world.kind_name(rock), Some("Rock"));
        assert!(world.is_kind::<Rock>(rock));
    }

    #[test]
    fn test_read_is_a_copy() {
        let mut world = World::new();
        let rock = world.create::<Rock>(Pose::default());

        let mut pose = world.read::<Pose>(rock).unwrap();
        pose.x = 50.0;
        assert_eq!(world.read::<Pose>(rock).unwrap().x, 0.0);

        assert!(world.write(rock, pose));
        assert_eq!(world.read::<Pose>(rock).unwrap().x, 50.0);
    }

    #[test]
    fn test_write_missing_component_is_noop() {
        let mut world = World::new();
        let marker = world.create::<Marker>(());

        assert!(!world.write(marker, Pose::new(1.0, 1.0, 1.0)));
        assert!(!world.has::<Pose>(marker));
        assert!(world.entities_with::<Pose>().is_empty());
    }

    #[test]
    fn test_add_overwrites_without_duplicating_index() {
        let mut world = World::new();
        let rock = world.create::<Rock>(Pose::default());
        world.add(rock, Velocity(5.0, 5.0));

        assert_eq!(world.entities_with::<Velocity>(), vec![rock]);
        assert_eq!(world.read::<Velocity>(rock), Some(Velocity(5.0, 5.0)));
    }

    #[test]
    fn test_remove_component() {
        let mut world = World::new();
        let rock = world.create::<Rock>(Pose::default());

        assert_eq!(world.remove::<Velocity>(rock), Some(Velocity(1.0, 0.0)));
        assert!(!world.has::<Velocity>(rock));
        assert_eq!(world.count_with::<Velocity>(), 0);
        assert!(world.remove::<Velocity>(rock).is_none());
    }

    #[test]
    fn test_destroy_removes_from_every_index() {
        let mut world = World::new();
        let rock = world.create::<Rock>(Pose::default());

        assert!(world.destroy(rock));
        assert!(!world.is_alive(rock));
        assert!(world.entities_with::<Pose>().is_empty());
        assert!(world.entities_with::<Velocity>().is_empty());
        assert_eq!(world.count_of_kind::<Rock>(), 0);
        assert!(world.read::<Pose>(rock).is_none());
        assert!(!world.destroy(rock));
    }

    #[test]
    fn test_identities_are_never_reused() {
        let mut world = World::new();
        let first = world.create::<Marker>(());
        world.destroy(first);
        let second = world.create::<Marker>(());

        assert_ne!(first, second);
        assert!(!world.is_alive(first));
        assert!(!world.has::<Tag>(first));
    }

    #[test]
    fn test_index_keeps_insertion_order() {
        let mut world = World::new();
        let rocks: Vec<Entity> = (0..5)
            .map(|i| world.create::<Rock>(Pose::new(f64::from(i), 0.0, 0.0)))
            .collect();
        world.destroy(rocks[2]);

        assert_eq!(
            world.entities_with::<Pose>(),
            vec![rocks[0], rocks[1], rocks[3], rocks[4]]
        );
        assert_eq!(world.entities_of_kind::<Rock>(), world.entities_with::<Pose>());
        assert_eq!(world.first_of_kind::<Rock>(), Some(rocks[0]));
    }

    #[test]
    fn test_for_each_tolerates_destruction_mid_pass() {
        let mut world = World::new();
        let rocks: Vec<Entity> = (0..4).map(|_| world.create::<Rock>(Pose::default())).collect();

        let mut visited = Vec::new();
        world.for_each_with::<Velocity, _>(|world, entity| {
            visited.push(entity);
            if entity == rocks[0] {
                world.destroy(rocks[1]);
                world.create::<Rock>(Pose::default());
            }
        });

        assert_eq!(visited, vec![rocks[0], rocks[2], rocks[3]]);
        assert_eq!(world.count_of_kind::<Rock>(), 4);
    }

    #[test]
    fn test_for_each_of_kind() {
        let mut world = World::new();
        world.create::<Rock>(Pose::default());
        world.create::<Marker>(());
        world.create::<Rock>(Pose::default());

        let mut count = 0;
        world.for_each_of_kind::<Rock, _>(|world, entity| {
            count += 1;
            world.modify::<Pose>(entity, |pose| pose.x += 1.0);
        });

        assert_eq!(count, 2);
        assert_eq!(world.count_of_kind::<Marker>(), 1);
        for rock in world.entities_of_kind::<Rock>() {
            assert_eq!(world.read::<Pose>(rock).unwrap().x, 1.0);
        }
    }

    #[test]
    fn test_apply_commands_in_order() {
        let mut world = World::new();
        let rock = world.create::<Rock>(Pose::default());
        let mut commands = Commands::new();
        commands.destroy(rock);
        commands.spawn::<Marker>(());
        commands.destroy(rock);

        world.apply(&mut commands);

        assert!(commands.is_empty());
        assert!(!world.is_alive(rock));
        assert_eq!(world.count_of_kind::<Marker>(), 1);
    }

    #[test]
    fn test_clear() {
        let mut world = World::new();
        world.create::<Rock>(Pose::default());
        world.create::<Marker>(());
        world.clear();

        assert!(world.is_empty());
        assert_eq!(world.count_with::<Pose>(), 0);
        assert_eq!(world.count_of_kind::<Rock>(), 0);
    }
}
