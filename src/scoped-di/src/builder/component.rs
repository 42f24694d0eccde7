use std::error::Error;

use crate::builder::{Injectable, Signature};
use crate::container::{Container, ContainerError};

/// A type that has a dedicated constructor for dependency injection.
///
/// Usually, you don't need to implement [`Component`] manually, because the
/// [`component`] attribute and the [`derive(Component)`] macro do it for you.
/// In case that you really want to write it on your own, take a look at the
/// following code snippet:
///
/// ```rust
/// # use std::convert::Infallible;
/// # use std::sync::Arc;
/// # use scoped_di::builder::{Component, Constructibility, Injectable, Parameter, Signature};
/// # use scoped_di::container::{Container, ContainerError};
/// struct Engine;
///
/// # impl Injectable for Engine {
/// #     fn constructibility() -> Constructibility<Self> {
/// #         Constructibility::component()
/// #     }
/// # }
/// # impl Component for Engine {
/// #     type Error = Infallible;
/// #     fn signature() -> Signature {
/// #         Signature::default()
/// #     }
/// #     fn construct(_: &Container) -> Result<Result<Self, Self::Error>, ContainerError> {
/// #         Ok(Ok(Engine))
/// #     }
/// # }
/// struct Car {
///     engine: Arc<Engine>,
///     radio: Option<Arc<Radio>>,
/// }
/// # struct Radio;
/// # impl Injectable for Radio {
/// #     fn constructibility() -> Constructibility<Self> {
/// #         Constructibility::Abstract
/// #     }
/// # }
///
/// impl Injectable for Car {
///     fn constructibility() -> Constructibility<Self> {
///         Constructibility::component()
///     }
/// }
///
/// impl Component for Car {
///     type Error = Infallible;
///
///     fn signature() -> Signature {
///         Signature::new(vec![
///             <Arc<Engine> as Parameter>::dependency(),
///             <Option<Arc<Radio>> as Parameter>::dependency(),
///         ])
///     }
///
///     fn construct(container: &Container) -> Result<Result<Self, Self::Error>, ContainerError> {
///         let engine = Parameter::resolve(container)?;
///         let radio = Parameter::resolve(container)?;
///         Ok(Ok(Self { engine, radio }))
///     }
/// }
///
/// let car = Container::new().require::<Car>().unwrap();
/// assert!(car.radio.is_none());
/// ```
///
/// [`component`]: crate::component
/// [`derive(Component)`]: crate::Component
pub trait Component: Injectable + Sized {
    /// The error occurred in object construction after all dependencies are
    /// resolved.
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Returns the parameters of the constructor in declared order.
    fn signature() -> Signature;

    /// Resolves the parameters from the container and calls the constructor.
    ///
    /// # Errors
    ///
    /// Returns an error if a required parameter can't be resolved.
    ///
    /// Returns an inner error [`Component::Error`] wrapped in the outer [`Ok`]
    /// if the constructor fails.
    fn construct(container: &Container) -> Result<Result<Self, Self::Error>, ContainerError>;
}
