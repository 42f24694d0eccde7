use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::key::{self, TypeKey};

/// Errors raised while building or resolving objects in a [`Container`].
///
/// [`Container`]: crate::container::Container
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ContainerError {
    #[snafu(display("{key} is an abstract type and no builder is bound to it"))]
    #[non_exhaustive]
    NotAbstractConstructible { key: TypeKey },
    #[snafu(display(
        "{key} has more than one constructor taking {arity} parameter(s), an explicit builder is required"
    ))]
    #[non_exhaustive]
    AmbiguousConstructor { key: TypeKey, arity: usize },
    #[snafu(display("the dependency {dependency} is an abstract type and no builder is bound to it"))]
    #[non_exhaustive]
    UnresolvedInterfaceDependency { dependency: TypeKey },
    #[snafu(display("{key} is not constructible and not provided within the current container"))]
    #[non_exhaustive]
    NotConstructible {
        key: TypeKey,
        source: Box<ContainerError>,
    },
    #[snafu(display("{key} is not provided within the current container"))]
    #[non_exhaustive]
    NotProvided { key: TypeKey },
    #[snafu(display("could not construct the object {key} which depends on itself somehow"))]
    #[non_exhaustive]
    CyclicDependency { key: TypeKey },
    #[snafu(display("could not construct the object {key}"))]
    #[non_exhaustive]
    ObjectConstruction {
        key: TypeKey,
        source: Arc<dyn Error + Send + Sync>,
    },
}

impl ContainerError {
    /// Creates a [`ContainerError::ObjectConstruction`] for `T` caused by
    /// `err`. Fallible builders return this when user code fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use scoped_di::prelude::*;
    /// struct Socket;
    ///
    /// let builder = Builder::<Socket>::new(|_| {
    ///     Err(ContainerError::object_construction::<Socket, _>("connection refused"))
    /// });
    /// let err = Container::new().provide_with(builder, Scope::Local).unwrap_err();
    /// assert_eq!(err.to_string(), format!("could not construct the object {}", key::of::<Socket>()));
    /// ```
    pub fn object_construction<T, E>(err: E) -> Self
    where
        T: ?Sized + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let source: Box<dyn Error + Send + Sync> = err.into();
        Self::ObjectConstruction {
            key: key::of::<T>(),
            source: Arc::from(source),
        }
    }

    /// Returns the innermost error of a chain of [`ContainerError::NotConstructible`].
    pub fn root_cause(&self) -> &ContainerError {
        let mut this = self;
        while let Self::NotConstructible { source, .. } = this {
            this = source;
        }
        this
    }
}
