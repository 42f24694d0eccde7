use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::ops::Deref;
use std::sync::Arc;

use crate::builder::{Dependency, Injectable};
use crate::container::{Container, ContainerError, Managed};
use crate::key;

/// A constructor parameter which can be resolved from a [`Container`].
///
/// - `Arc<T>` is a required dependency. If `T` is an interface without a
///   bound builder, resolving it fails with
///   [`ContainerError::UnresolvedInterfaceDependency`].
/// - `Option<Arc<T>>` is an optional dependency, which becomes [`None`] if
///   `T` can't be resolved.
/// - [`Provided<T>`] and `Option<Provided<T>>` are the same for objects
///   which are registered explicitly and never built on demand.
pub trait Parameter: Sized + Send + Sync + 'static {
    fn dependency() -> Dependency;

    /// # Errors
    ///
    /// Returns an error if a required dependency can't be resolved.
    fn resolve(container: &Container) -> Result<Self, ContainerError>;
}

impl<T> Parameter for Arc<T>
where
    T: Injectable + ?Sized,
{
    fn dependency() -> Dependency {
        Dependency::required(key::of::<T>())
    }

    fn resolve(container: &Container) -> Result<Self, ContainerError> {
        container.resolve_dependency::<T>()
    }
}

impl<T> Parameter for Option<Arc<T>>
where
    T: Injectable + ?Sized,
{
    fn dependency() -> Dependency {
        Dependency::optional(key::of::<T>())
    }

    fn resolve(container: &Container) -> Result<Self, ContainerError> {
        Ok(container.try_require::<T>())
    }
}

/// A shared object of `T` which must have been registered explicitly, e.g.
/// with [`Container::provide_with`].
///
/// `T` doesn't need to implement [`Injectable`], so types from other crates
/// such as `String` or `u16` can be constructor parameters as well.
///
/// # Examples
///
/// ```rust
/// # use scoped_di::builder::Provided;
/// # use scoped_di::prelude::*;
/// #[derive(Component)]
/// struct Server {
///     port: Provided<u16>,
/// }
///
/// let container = Container::new();
/// container.provide_with(Builder::from_value(8080u16), Scope::Singleton).unwrap();
///
/// let server = container.require::<Server>().unwrap();
/// assert_eq!(*server.port, 8080);
/// ```
pub struct Provided<T: ?Sized>(Arc<T>);

impl<T: ?Sized> Provided<T> {
    pub fn new(object: Arc<T>) -> Self {
        Self(object)
    }

    pub fn into_inner(self) -> Arc<T> {
        self.0
    }
}

impl<T: ?Sized> Clone for Provided<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Provided<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: ?Sized> AsRef<T> for Provided<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: Debug + ?Sized> Debug for Provided<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("Provided").field(&&*self.0).finish()
    }
}

impl<T> Parameter for Provided<T>
where
    T: Managed + ?Sized,
{
    fn dependency() -> Dependency {
        Dependency::required(key::of::<T>())
    }

    fn resolve(container: &Container) -> Result<Self, ContainerError> {
        container.lookup_dependency::<T>().map(Self)
    }
}

impl<T> Parameter for Option<Provided<T>>
where
    T: Managed + ?Sized,
{
    fn dependency() -> Dependency {
        Dependency::optional(key::of::<T>())
    }

    fn resolve(container: &Container) -> Result<Self, ContainerError> {
        Ok(container.lookup::<T>().map(Provided))
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{Builder, Constructibility};
    use crate::scope::Scope;

    use super::*;

    trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> u64 {
            42
        }
    }

    crate::interface!(dyn Clock => [FixedClock]);

    struct Port(u16);

    impl Injectable for Port {
        fn constructibility() -> Constructibility<Self> {
            Constructibility::Ambiguous { arity: 0 }
        }
    }

    #[test]
    fn parameter_dependency_succeeds() {
        assert_eq!(
            <Arc<dyn Clock> as Parameter>::dependency(),
            Dependency::required(key::of::<dyn Clock>())
        );
        assert_eq!(
            <Option<Arc<dyn Clock>> as Parameter>::dependency(),
            Dependency::optional(key::of::<dyn Clock>())
        );
    }

    #[test]
    fn parameter_resolve_fails_when_interface_is_unbound() {
        let container = Container::new();
        assert!(matches!(
            <Arc<dyn Clock> as Parameter>::resolve(&container),
            Err(ContainerError::UnresolvedInterfaceDependency { dependency })
                if dependency == key::of::<dyn Clock>()
        ));
        assert!(<Option<Arc<dyn Clock>> as Parameter>::resolve(&container)
            .unwrap()
            .is_none());
    }

    #[test]
    fn parameter_resolve_wraps_other_errors() {
        let container = Container::new();
        assert!(matches!(
            <Arc<Port> as Parameter>::resolve(&container),
            Err(ContainerError::NotConstructible { .. })
        ));

        container
            .provide_with(Builder::new(|_| Ok(Port(8080))), Scope::Local)
            .unwrap();
        let port = <Arc<Port> as Parameter>::resolve(&container).unwrap();
        assert_eq!(port.0, 8080);
    }

    #[test]
    fn parameter_resolve_succeeds_when_interface_is_bound() {
        let container = Container::new();
        container
            .provide_with(
                Builder::<dyn Clock>::from_fn(|_| Ok(Arc::new(FixedClock))),
                Scope::Local,
            )
            .unwrap();

        let clock = <Arc<dyn Clock> as Parameter>::resolve(&container).unwrap();
        assert_eq!(clock.now(), 42);
        let clock = <Option<Arc<dyn Clock>> as Parameter>::resolve(&container).unwrap();
        assert!(clock.is_some());
    }

    #[test]
    fn provided_resolve_succeeds_when_object_is_registered() {
        let container = Container::new();
        container
            .provide_with(Builder::from_value(String::from("db.local")), Scope::Singleton)
            .unwrap();

        let host = <Provided<String> as Parameter>::resolve(&container).unwrap();
        assert_eq!(host.as_str(), "db.local");
        assert!(Arc::ptr_eq(
            &host.into_inner(),
            &container.lookup::<String>().unwrap()
        ));
        assert_eq!(
            <Provided<String> as Parameter>::dependency(),
            Dependency::required(key::of::<String>())
        );
    }

    #[test]
    fn provided_resolve_fails_when_object_is_not_registered() {
        let container = Container::new();
        let err = <Provided<String> as Parameter>::resolve(&container).unwrap_err();
        assert!(matches!(
            &err,
            ContainerError::NotConstructible { key: k, .. } if *k == key::of::<String>()
        ));
        assert!(matches!(
            err.root_cause(),
            ContainerError::NotProvided { key: k } if *k == key::of::<String>()
        ));
        assert!(!container.contains::<String>());

        let host = <Option<Provided<String>> as Parameter>::resolve(&container).unwrap();
        assert!(host.is_none());
    }
}
