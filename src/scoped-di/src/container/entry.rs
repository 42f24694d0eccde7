use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::{Container, ContainerError, SharedManaged};
use crate::key::TypeKey;
use crate::scope::Scope;

/// A type-erased [`Builder`] whose product is an `Arc<T>` boxed as a
/// [`SharedManaged`].
///
/// [`Builder`]: crate::builder::Builder
pub(crate) type ErasedBuilder =
    Arc<dyn Fn(&Container) -> Result<Box<dyn SharedManaged>, ContainerError> + Send + Sync>;

pub(crate) struct FactoryEntry {
    builder: ErasedBuilder,
    scope: Scope,
}

impl FactoryEntry {
    pub fn new(builder: ErasedBuilder, scope: Scope) -> Self {
        Self { builder, scope }
    }

    pub fn builder(&self) -> ErasedBuilder {
        Arc::clone(&self.builder)
    }

    #[cfg(test)]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the copy of the entry a child scope receives, if any.
    pub fn propagate(&self) -> Option<Self> {
        if self.scope.propagates_factory() {
            Some(Self::new(self.builder(), self.scope))
        } else {
            None
        }
    }
}

impl Debug for FactoryEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FactoryEntry")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

pub(crate) struct InstanceEntry {
    object: Box<dyn SharedManaged>,
    scope: Scope,
}

impl InstanceEntry {
    pub fn new(object: Box<dyn SharedManaged>, scope: Scope) -> Self {
        Self { object, scope }
    }

    pub fn object(&self) -> Box<dyn SharedManaged> {
        self.object.dyn_clone()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the entry a child scope receives, if any. The returned entry
    /// points to the same object as `self`.
    pub fn propagate(&self) -> Option<Self> {
        if self.scope.propagates_instance() {
            Some(Self::new(self.object(), self.scope))
        } else {
            None
        }
    }
}

impl Debug for InstanceEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstanceEntry")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub(crate) struct EntryMap {
    factories: HashMap<TypeKey, FactoryEntry>,
    instances: HashMap<TypeKey, InstanceEntry>,
    constructing: HashSet<TypeKey>,
}

impl EntryMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// Seeds a map for a child scope according to the scope of each entry.
    pub fn propagate(&self) -> Self {
        let factories = self
            .factories
            .iter()
            .filter_map(|(key, entry)| entry.propagate().map(|entry| (*key, entry)))
            .collect();
        let instances = self
            .instances
            .iter()
            .filter_map(|(key, entry)| entry.propagate().map(|entry| (*key, entry)))
            .collect();

        Self {
            factories,
            instances,
            constructing: HashSet::new(),
        }
    }

    pub fn factory(&self, key: &TypeKey) -> Option<&FactoryEntry> {
        self.factories.get(key)
    }

    pub fn instance(&self, key: &TypeKey) -> Option<&InstanceEntry> {
        self.instances.get(key)
    }

    pub fn insert_factory(&mut self, key: TypeKey, entry: FactoryEntry) -> Option<FactoryEntry> {
        self.factories.insert(key, entry)
    }

    pub fn insert_instance(&mut self, key: TypeKey, entry: InstanceEntry) -> Option<InstanceEntry> {
        self.instances.insert(key, entry)
    }

    /// Marks `key` as being constructed. Returns false if it already is.
    pub fn start_constructing(&mut self, key: TypeKey) -> bool {
        self.constructing.insert(key)
    }

    pub fn finish_constructing(&mut self, key: &TypeKey) {
        self.constructing.remove(key);
    }

    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.factories
            .keys()
            .chain(
                self.instances
                    .keys()
                    .filter(|key| !self.factories.contains_key(*key)),
            )
    }
}

#[cfg(test)]
mod tests {
    use crate::key;
    use crate::util::any::AsAny;

    use super::*;

    fn make_builder(value: i32) -> ErasedBuilder {
        Arc::new(
            move |_: &Container| -> Result<Box<dyn SharedManaged>, ContainerError> {
                Ok(Box::new(Arc::new(value)))
            },
        )
    }

    fn make_object(value: i32) -> Box<dyn SharedManaged> {
        Box::new(Arc::new(value))
    }

    #[test]
    fn factory_entry_propagate_succeeds_when_scope_is_local() {
        let entry = FactoryEntry::new(make_builder(42), Scope::Local);
        let copied = entry.propagate().unwrap();
        assert_eq!(copied.scope(), Scope::Local);
        assert!(Arc::ptr_eq(&entry.builder(), &copied.builder()));
    }

    #[test]
    fn factory_entry_propagate_skips_singleton() {
        let entry = FactoryEntry::new(make_builder(42), Scope::Singleton);
        assert!(entry.propagate().is_none());
    }

    #[test]
    fn instance_entry_propagate_shares_singleton() {
        let entry = InstanceEntry::new(make_object(42), Scope::Singleton);
        let shared = entry.propagate().unwrap();

        let original = entry.object();
        let original = (*original).as_any().downcast_ref::<Arc<i32>>().unwrap();
        let shared = shared.object();
        let shared = (*shared).as_any().downcast_ref::<Arc<i32>>().unwrap();
        assert!(Arc::ptr_eq(original, shared));
    }

    #[test]
    fn instance_entry_propagate_skips_local() {
        let entry = InstanceEntry::new(make_object(42), Scope::Local);
        assert!(entry.propagate().is_none());
    }

    #[test]
    fn entry_map_propagate_succeeds() {
        let mut map = EntryMap::new();
        map.insert_factory(key::of::<i32>(), FactoryEntry::new(make_builder(1), Scope::Local));
        map.insert_instance(key::of::<i32>(), InstanceEntry::new(make_object(1), Scope::Local));
        map.insert_factory(key::of::<u32>(), FactoryEntry::new(make_builder(2), Scope::Singleton));
        map.insert_instance(key::of::<u32>(), InstanceEntry::new(make_object(2), Scope::Singleton));
        assert!(map.start_constructing(key::of::<i64>()));

        let child = map.propagate();
        assert!(child.factory(&key::of::<i32>()).is_some());
        assert!(child.instance(&key::of::<i32>()).is_none());
        assert!(child.factory(&key::of::<u32>()).is_none());
        assert!(child.instance(&key::of::<u32>()).is_some());
        assert!(child.constructing.is_empty());
    }

    #[test]
    fn entry_map_keys_are_unique() {
        let mut map = EntryMap::new();
        map.insert_factory(key::of::<i32>(), FactoryEntry::new(make_builder(1), Scope::Local));
        map.insert_instance(key::of::<i32>(), InstanceEntry::new(make_object(1), Scope::Local));
        map.insert_instance(key::of::<u32>(), InstanceEntry::new(make_object(2), Scope::Singleton));

        let mut keys: Vec<_> = map.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, vec![key::of::<i32>(), key::of::<u32>()]);
    }

    #[test]
    fn entry_map_constructing_succeeds() {
        let mut map = EntryMap::new();
        assert!(map.start_constructing(key::of::<i32>()));
        assert!(!map.start_constructing(key::of::<i32>()));
        map.finish_constructing(&key::of::<i32>());
        assert!(map.start_constructing(key::of::<i32>()));
    }
}
