use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use tracing::debug;

use crate::builder::{self, Builder, Component, Constructibility, Injectable};
use crate::container::core::ContainerCore;
use crate::container::registry::{Configurer, RegistryError};
use crate::container::{ContainerError, Managed, SharedManaged};
use crate::key::{self, TypeKey};
use crate::module::Module;
use crate::scope::Scope;
use crate::util::any::Downcast;

/// A registry of factories and constructed objects, which is also the unit of
/// lifetime nesting.
///
/// A [`Container`] is a handle: cloning it yields another handle to the same
/// registry, while [`Container::create_scope`] yields a new registry seeded
/// from the current one.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use scoped_di::prelude::*;
/// #[derive(Component)]
/// struct Config;
///
/// #[derive(Component)]
/// struct Service {
///     config: Arc<Config>,
/// }
///
/// let container = Container::new();
/// container.provide::<Config>(Scope::Singleton).unwrap();
///
/// let service = container.require::<Service>().unwrap();
/// let config = container.require::<Config>().unwrap();
/// assert!(Arc::ptr_eq(&service.config, &config));
/// ```
#[derive(Clone)]
pub struct Container {
    core: Arc<ContainerCore>,
}

impl Container {
    /// Creates an empty root container.
    pub fn new() -> Self {
        Self {
            core: Arc::new(ContainerCore::new_root()),
        }
    }

    /// Creates a root container configured by `module`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Aggregated`] with every error the module and
    /// its registrations reported.
    pub fn init<M>(module: M) -> Result<Self, RegistryError>
    where
        M: Module,
    {
        let mut configurer = Configurer::new(Self::new());
        configurer.setup(&module);
        configurer.finish()
    }

    /// Registers `T` with its automatically derived builder and constructs an
    /// object of it right away.
    ///
    /// Only types implementing [`Component`] are accepted, so trait objects
    /// and types with an ambiguous constructor are rejected at compile time.
    /// Use [`Container::provide_with`] for them.
    ///
    /// # Errors
    ///
    /// Returns an error if the object can't be constructed. Nothing is
    /// registered in this case.
    pub fn provide<T>(&self, scope: Scope) -> Result<(), ContainerError>
    where
        T: Component,
    {
        self.provide_with(builder::as_::<T>(), scope)
    }

    /// Registers `T` with an explicit builder and constructs an object with
    /// it right away. A previous registration of `T` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the object can't be constructed. Nothing is
    /// registered in this case.
    pub fn provide_with<T>(&self, builder: Builder<T>, scope: Scope) -> Result<(), ContainerError>
    where
        T: Managed + ?Sized,
    {
        let key = key::of::<T>();
        debug!(%key, %scope, depth = self.depth(), "providing an object");
        self.core.provide(self, key, builder.erase(), scope)
    }

    /// Returns the object of `T`, building and registering it on demand.
    ///
    /// Returns [`None`] if `T` is neither registered nor directly
    /// constructible, or if its construction fails.
    pub fn try_require<T>(&self) -> Option<Arc<T>>
    where
        T: Injectable + ?Sized,
    {
        match self.resolve::<T>() {
            Ok(object) => Some(object),
            Err(err) => {
                debug!(key = %key::of::<T>(), error = %err, "could not resolve an object");
                None
            }
        }
    }

    /// Returns the object of `T`, building and registering it on demand.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NotConstructible`] wrapping the reason if
    /// [`Container::try_require`] would return [`None`].
    pub fn require<T>(&self) -> Result<Arc<T>, ContainerError>
    where
        T: Injectable + ?Sized,
    {
        self.resolve::<T>()
            .map_err(|err| ContainerError::NotConstructible {
                key: key::of::<T>(),
                source: Box::new(err),
            })
    }

    /// Returns the object of `T` if it is already constructed or a factory is
    /// registered for it. Unregistered types are never built.
    pub fn lookup<T>(&self) -> Option<Arc<T>>
    where
        T: Managed + ?Sized,
    {
        let key = key::of::<T>();
        match self.core.get_object(self, key) {
            Ok(object) => object.map(Self::unwrap_object),
            Err(err) => {
                debug!(%key, error = %err, "could not look up an object");
                None
            }
        }
    }

    /// Returns true if an object or a factory of `T` is stored in this
    /// container.
    pub fn contains<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.core.contains(key::of::<T>())
    }

    /// Returns the scope the stored object of `T` is tagged with.
    pub fn scope_of<T>(&self) -> Option<Scope>
    where
        T: ?Sized + 'static,
    {
        self.core.instance_scope(key::of::<T>())
    }

    /// Returns the keys of every type stored in this container, sorted by
    /// type name.
    pub fn keys(&self) -> Vec<TypeKey> {
        self.core.keys()
    }

    /// Creates a child container seeded from the current state of `self`.
    ///
    /// The child receives a copy of every [`Scope::Local`] factory and shares
    /// every [`Scope::Singleton`] object. After that, registrations and
    /// resolutions in either container affect only that container.
    pub fn create_scope(&self) -> Self {
        let core = ContainerCore::new_sub(&self.core);
        debug!(depth = core.depth(), "creating a scope");
        Self {
            core: Arc::new(core),
        }
    }

    /// Returns the container this one was created from, if it is still alive.
    pub fn parent(&self) -> Option<Self> {
        self.core.parent().map(|core| Self { core })
    }

    /// Returns the number of ancestors of this container.
    pub fn depth(&self) -> usize {
        self.core.depth()
    }

    /// Resolves `T` as a constructor parameter. An abstract dependency without
    /// a bound builder is reported as such, other failures are wrapped in
    /// [`ContainerError::NotConstructible`].
    pub(crate) fn resolve_dependency<T>(&self) -> Result<Arc<T>, ContainerError>
    where
        T: Injectable + ?Sized,
    {
        self.resolve::<T>().map_err(|err| match err {
            ContainerError::NotAbstractConstructible { key } => {
                ContainerError::UnresolvedInterfaceDependency { dependency: key }
            }
            err => ContainerError::NotConstructible {
                key: key::of::<T>(),
                source: Box::new(err),
            },
        })
    }

    /// Resolves an explicitly registered `T` as a constructor parameter. Types
    /// which are not registered are never built, and their absence is
    /// wrapped in [`ContainerError::NotConstructible`].
    pub(crate) fn lookup_dependency<T>(&self) -> Result<Arc<T>, ContainerError>
    where
        T: Managed + ?Sized,
    {
        let key = key::of::<T>();
        self.core
            .get_object(self, key)
            .and_then(|object| object.ok_or(ContainerError::NotProvided { key }))
            .map(Self::unwrap_object)
            .map_err(|err| ContainerError::NotConstructible {
                key,
                source: Box::new(err),
            })
    }

    fn resolve<T>(&self) -> Result<Arc<T>, ContainerError>
    where
        T: Injectable + ?Sized,
    {
        let key = key::of::<T>();
        if let Some(object) = self.core.get_object(self, key)? {
            return Ok(Self::unwrap_object(object));
        }

        match T::constructibility() {
            Constructibility::Constructible { signature, builder } => {
                debug!(%key, %signature, "providing a directly constructible type on demand");
                self.provide_with(builder, Scope::Local)?;
                match self.core.get_object(self, key)? {
                    Some(object) => Ok(Self::unwrap_object(object)),
                    None => unreachable!("the object of {key} should have been provided"),
                }
            }
            Constructibility::Abstract => Err(ContainerError::NotAbstractConstructible { key }),
            Constructibility::Ambiguous { arity } => {
                Err(ContainerError::AmbiguousConstructor { key, arity })
            }
        }
    }

    fn unwrap_object<T>(object: Box<dyn SharedManaged>) -> Arc<T>
    where
        T: Managed + ?Sized,
    {
        match object.downcast::<Arc<T>>() {
            Ok(object) => *object,
            Err(_) => unreachable!("the object's type should be `Arc<T>`"),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Container")
            .field("depth", &self.depth())
            .field("keys", &self.keys())
            .finish()
    }
}
