use std::sync::Arc;

use crate::container::Managed;

/// A concrete type which can be used where the interface `I` is required.
///
/// This is implemented by [`interface!`](crate::interface) and used by
/// [`Builder::upcast`](crate::builder::Builder::upcast) to bind an
/// implementation to an interface.
pub trait Implements<I>: Managed + Sized
where
    I: Managed + ?Sized,
{
    fn upcast(this: Arc<Self>) -> Arc<I>;
}

/// Declares trait objects as abstract [`Injectable`] types and lists the
/// concrete types implementing them.
///
/// An interface is never constructed on demand. Resolving it requires a
/// builder registered with [`Container::provide_with`].
///
/// # Examples
///
/// ```rust
/// # use scoped_di::prelude::*;
/// trait Input: Send + Sync {
///     fn read(&self) -> char;
/// }
///
/// #[derive(Component)]
/// struct Keyboard;
///
/// impl Input for Keyboard {
///     fn read(&self) -> char {
///         'k'
///     }
/// }
///
/// scoped_di::interface!(dyn Input => [Keyboard]);
///
/// let container = Container::new();
/// assert!(container.try_require::<dyn Input>().is_none());
///
/// container
///     .provide_with::<dyn Input>(as_::<Keyboard>().upcast(), Scope::Local)
///     .unwrap();
/// assert_eq!(container.require::<dyn Input>().unwrap().read(), 'k');
/// ```
///
/// [`Injectable`]: crate::builder::Injectable
/// [`Container::provide_with`]: crate::container::Container::provide_with
#[macro_export]
macro_rules! interface {
    ($(dyn $interface:path => [$($implementation:ty),* $(,)?]),+ $(,)?) => {
        $(
            impl $crate::builder::Injectable for dyn $interface {
                fn constructibility() -> $crate::builder::Constructibility<Self> {
                    $crate::builder::Constructibility::Abstract
                }
            }

            $(
                impl $crate::builder::Implements<dyn $interface> for $implementation {
                    fn upcast(
                        this: ::std::sync::Arc<Self>,
                    ) -> ::std::sync::Arc<dyn $interface> {
                        this
                    }
                }
            )*
        )+
    };
}
