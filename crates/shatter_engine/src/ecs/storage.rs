//! Typed component storage with an insertion-order index

use std::any::Any;

use slotmap::SecondaryMap;

use super::{Component, Entity};

/// Type-erased view of a storage, used when an entity is destroyed
pub(crate) trait AnyStorage {
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Every component of one type, plus the order entities gained it
pub(crate) struct ComponentStorage<T: Component> {
    data: SecondaryMap<Entity, T>,
    order: Vec<Entity>,
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self {
            data: SecondaryMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Component> ComponentStorage<T> {
    /// Insert or overwrite; an entity is indexed only once
    pub fn insert(&mut self, entity: Entity, component: T) {
        if self.data.insert(entity, component).is_none() {
            self.order.push(entity);
        }
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data.get(entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data.get_mut(entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.data.contains_key(entity)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let removed = self.data.remove(entity)?;
        self.order.retain(|&indexed| indexed != entity);
        Some(removed)
    }

    /// Entities holding this component, in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    #[test]
    fn test_overwrite_keeps_single_index_entry() {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        let entity = keys.insert(());
        let mut storage = ComponentStorage::default();

        storage.insert(entity, Health(1));
        storage.insert(entity, Health(2));

        assert_eq!(storage.entities(), &[entity]);
        assert_eq!(storage.get(entity), Some(&Health(2)));
    }

    #[test]
    fn test_remove_updates_index() {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        let first = keys.insert(());
        let second = keys.insert(());
        let mut storage = ComponentStorage::default();
        storage.insert(first, Health(1));
        storage.insert(second, Health(2));

        assert_eq!(storage.remove(first), Some(Health(1)));
        assert_eq!(storage.entities(), &[second]);
        assert!(!storage.contains(first));
        assert_eq!(AnyStorage::len(&storage), 1);
    }
}
