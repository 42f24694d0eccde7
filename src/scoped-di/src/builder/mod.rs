mod closure;
mod component;
mod interface;
mod parameter;
mod signature;

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::entry::ErasedBuilder;
use crate::container::{Container, ContainerError, Managed, SharedManaged};
use crate::key;

pub use closure::Closure;
pub use component::Component;
pub use interface::Implements;
pub use parameter::{Parameter, Provided};
pub use signature::{Dependency, Signature};

/// A shared function which constructs an object of `T` from a [`Container`].
///
/// Every call to [`Builder::build`] should return a new object. Sharing is
/// decided by the [`Scope`] the builder is registered with, not by the
/// builder itself. Dependencies are resolved from the container passed in,
/// which is always the container performing the resolution.
///
/// `T` may be unsized, so a builder can produce trait objects:
///
/// ```rust
/// # use std::sync::Arc;
/// # use scoped_di::builder::Builder;
/// # use scoped_di::container::Container;
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "Hello".to_string()
///     }
/// }
///
/// let builder = Builder::<dyn Greeter>::from_fn(|_| Ok(Arc::new(English)));
/// let greeter = builder.build(&Container::new()).unwrap();
/// assert_eq!(greeter.greet(), "Hello");
/// ```
///
/// [`Scope`]: crate::scope::Scope
pub struct Builder<T>
where
    T: Managed + ?Sized,
{
    build: Arc<dyn Fn(&Container) -> Result<Arc<T>, ContainerError> + Send + Sync>,
}

impl<T> Builder<T>
where
    T: Managed + ?Sized,
{
    /// Creates a [`Builder`] from a function returning the shared object
    /// directly.
    pub fn from_fn<F>(build: F) -> Self
    where
        F: Fn(&Container) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
        }
    }

    /// Constructs a new object, resolving its dependencies from `container`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved or the construction
    /// itself fails.
    pub fn build(&self, container: &Container) -> Result<Arc<T>, ContainerError> {
        (self.build)(container)
    }

    /// Returns a [`Builder`] which converts every object built by `self` with
    /// `f`.
    pub fn map<U, F>(self, f: F) -> Builder<U>
    where
        U: Managed + ?Sized,
        F: Fn(Arc<T>) -> Arc<U> + Send + Sync + 'static,
    {
        let build = self.build;
        Builder::from_fn(move |container| build(container).map(&f))
    }

    pub(crate) fn erase(self) -> ErasedBuilder {
        let build = self.build;
        Arc::new(
            move |container: &Container| -> Result<Box<dyn SharedManaged>, ContainerError> {
                build(container).map(|object| -> Box<dyn SharedManaged> { Box::new(object) })
            },
        )
    }
}

impl<T> Builder<T>
where
    T: Managed,
{
    /// Creates a [`Builder`] from a function returning the object by value.
    ///
    /// A failure of user code should be reported with
    /// [`ContainerError::object_construction`], or the function can be
    /// written as a [`Closure`] and passed to [`Builder::from_closure`].
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Self::from_fn(move |container| build(container).map(Arc::new))
    }

    /// Creates a [`Builder`] which returns a clone of `value` on each call.
    pub fn from_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move |_| Ok(value.clone()))
    }

    /// Creates a [`Builder`] from a [`Closure`], whose arguments are resolved
    /// from the container before each call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::convert::Infallible;
    /// # use std::sync::Arc;
    /// # use scoped_di::prelude::*;
    /// #[derive(Component)]
    /// struct Port;
    ///
    /// struct Address(String);
    ///
    /// let builder = Builder::from_closure(|_: Arc<Port>| Ok::<_, Infallible>(Address("localhost".into())));
    /// let address = builder.build(&Container::new()).unwrap();
    /// assert_eq!(address.0, "localhost");
    /// ```
    pub fn from_closure<C, D>(closure: C) -> Self
    where
        C: Closure<D, Constructed = T>,
        D: Send + Sync + 'static,
    {
        Self::new(move |container| match closure.run(container) {
            Ok(Ok(object)) => Ok(object),
            Ok(Err(err)) => Err(ContainerError::object_construction::<T, _>(err)),
            Err(err) => Err(err),
        })
    }

    /// Turns `self` into a [`Builder`] of the interface `I`.
    pub fn upcast<I>(self) -> Builder<I>
    where
        I: Managed + ?Sized,
        T: Implements<I>,
    {
        self.map(<T as Implements<I>>::upcast)
    }
}

impl<T> Clone for Builder<T>
where
    T: Managed + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
        }
    }
}

impl<T> Debug for Builder<T>
where
    T: Managed + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Builder")
            .field("type", &key::of::<T>())
            .finish_non_exhaustive()
    }
}

/// Returns the automatically derived [`Builder`] of the [`Component`] `C`,
/// which resolves every constructor parameter and calls the constructor.
pub fn as_<C>() -> Builder<C>
where
    C: Component,
{
    Builder::new(|container| match C::construct(container) {
        Ok(Ok(object)) => Ok(object),
        Ok(Err(err)) => Err(ContainerError::object_construction::<C, _>(err)),
        Err(err) => Err(err),
    })
}

/// A type which can be asked how to construct itself.
///
/// Concrete types usually get this from [`component`] or
/// [`derive(Component)`], and trait objects from [`interface!`]. A type
/// without an implementation can still be registered with an explicit
/// [`Builder`] and retrieved with [`Container::lookup`].
///
/// [`component`]: crate::component
/// [`derive(Component)`]: crate::Component
/// [`interface!`]: crate::interface
pub trait Injectable: Managed {
    fn constructibility() -> Constructibility<Self>;
}

/// The answer of [`Injectable::constructibility`].
pub enum Constructibility<T>
where
    T: Managed + ?Sized,
{
    /// `T` has exactly one constructor of minimal arity.
    Constructible {
        signature: Signature,
        builder: Builder<T>,
    },
    /// `T` is an interface and has no constructor.
    Abstract,
    /// `T` has more than one constructor of the minimal arity.
    Ambiguous { arity: usize },
}

impl<C> Constructibility<C>
where
    C: Component,
{
    pub fn component() -> Self {
        Self::Constructible {
            signature: C::signature(),
            builder: as_::<C>(),
        }
    }
}

impl<T> Debug for Constructibility<T>
where
    T: Managed + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Constructible { signature, .. } => f
                .debug_struct("Constructible")
                .field("signature", signature)
                .finish_non_exhaustive(),
            Self::Abstract => f.write_str("Abstract"),
            Self::Ambiguous { arity } => {
                f.debug_struct("Ambiguous").field("arity", arity).finish()
            }
        }
    }
}

/// Returns the ordered dependencies of the constructor of `T`.
///
/// # Errors
///
/// Returns [`ContainerError::NotAbstractConstructible`] if `T` is an
/// interface, or [`ContainerError::AmbiguousConstructor`] if `T` has no
/// single constructor of minimal arity.
pub fn signature_of<T>() -> Result<Signature, ContainerError>
where
    T: Injectable + ?Sized,
{
    let key = key::of::<T>();
    match T::constructibility() {
        Constructibility::Constructible { signature, .. } => Ok(signature),
        Constructibility::Abstract => Err(ContainerError::NotAbstractConstructible { key }),
        Constructibility::Ambiguous { arity } => {
            Err(ContainerError::AmbiguousConstructor { key, arity })
        }
    }
}
