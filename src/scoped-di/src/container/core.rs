use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::trace;

use crate::container::entry::{EntryMap, ErasedBuilder, FactoryEntry, InstanceEntry};
use crate::container::{Container, ContainerError, SharedManaged};
use crate::key::TypeKey;
use crate::scope::Scope;

pub struct ContainerCore {
    parent: Option<Weak<Self>>,
    depth: usize,
    entries: RwLock<EntryMap>,
}

impl ContainerCore {
    pub fn new_root() -> Self {
        Self {
            parent: None,
            depth: 0,
            entries: RwLock::new(EntryMap::new()),
        }
    }

    pub fn new_sub(parent: &Arc<Self>) -> Self {
        let entries = parent.entries.read().propagate();
        Self {
            parent: Some(Arc::downgrade(parent)),
            depth: parent.depth + 1,
            entries: RwLock::new(entries),
        }
    }

    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Builds an object with `builder` right away, then stores both the object
    /// and the factory under `key`, replacing any previous entry. Nothing is
    /// stored if the construction fails.
    pub fn provide(
        &self,
        container: &Container,
        key: TypeKey,
        builder: ErasedBuilder,
        scope: Scope,
    ) -> Result<(), ContainerError> {
        let object = self.construct_object(container, key, &builder)?;

        let mut entries = self.entries.write();
        entries.insert_instance(key, InstanceEntry::new(object, scope));
        entries.insert_factory(key, FactoryEntry::new(builder, scope));
        Ok(())
    }

    /// Returns the object stored under `key`, building it from a registered
    /// factory first if necessary. Returns `Ok(None)` if neither exists.
    pub fn get_object(
        &self,
        container: &Container,
        key: TypeKey,
    ) -> Result<Option<Box<dyn SharedManaged>>, ContainerError> {
        if let Some(object) = self.try_get_constructed_object(key) {
            trace!(%key, depth = self.depth, "found a constructed object");
            return Ok(Some(object));
        }

        let Some(builder) = self.try_get_builder(key) else {
            return Ok(None);
        };

        trace!(%key, depth = self.depth, "building an object from its factory");
        let object = self.construct_object(container, key, &builder)?;

        // Objects built lazily are always local to this container, whatever
        // scope their factory was registered with.
        let mut entries = self.entries.write();
        entries.insert_instance(key, InstanceEntry::new(object.dyn_clone(), Scope::Local));
        Ok(Some(object))
    }

    pub fn contains(&self, key: TypeKey) -> bool {
        let entries = self.entries.read();
        entries.instance(&key).is_some() || entries.factory(&key).is_some()
    }

    pub fn instance_scope(&self, key: TypeKey) -> Option<Scope> {
        self.entries.read().instance(&key).map(InstanceEntry::scope)
    }

    #[cfg(test)]
    pub fn factory_scope(&self, key: TypeKey) -> Option<Scope> {
        self.entries.read().factory(&key).map(FactoryEntry::scope)
    }

    pub fn keys(&self) -> Vec<TypeKey> {
        let mut keys: Vec<_> = self.entries.read().keys().copied().collect();
        keys.sort();
        keys
    }

    fn try_get_constructed_object(&self, key: TypeKey) -> Option<Box<dyn SharedManaged>> {
        self.entries.read().instance(&key).map(InstanceEntry::object)
    }

    fn try_get_builder(&self, key: TypeKey) -> Option<ErasedBuilder> {
        self.entries.read().factory(&key).map(FactoryEntry::builder)
    }

    fn construct_object(
        &self,
        container: &Container,
        key: TypeKey,
        builder: &ErasedBuilder,
    ) -> Result<Box<dyn SharedManaged>, ContainerError> {
        let _guard = ConstructionGuard::new(self, key)?;
        builder(container)
    }
}

/// Marks a key as being constructed in a container until dropped, so that a
/// builder which needs its own product is reported instead of recursing
/// forever.
struct ConstructionGuard<'a> {
    core: &'a ContainerCore,
    key: TypeKey,
}

impl<'a> ConstructionGuard<'a> {
    fn new(core: &'a ContainerCore, key: TypeKey) -> Result<Self, ContainerError> {
        if core.entries.write().start_constructing(key) {
            Ok(Self { core, key })
        } else {
            Err(ContainerError::CyclicDependency { key })
        }
    }
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        self.core.entries.write().finish_constructing(&self.key);
    }
}
