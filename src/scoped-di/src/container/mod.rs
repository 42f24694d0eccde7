pub mod registry;

mod core;
pub(crate) mod entry;
mod error;
mod handle;

use std::sync::Arc;

use crate::util::any::AsAny;

pub use error::ContainerError;
pub use handle::Container;

/// A type whose objects can be managed by a [`Container`].
///
/// Both sized types and trait objects are managed types, as long as they can
/// be shared across threads and contain no borrowed data.
pub trait Managed: Send + Sync + 'static {}

impl<T> Managed for T where T: Send + Sync + ?Sized + 'static {}

/// A type-erased handle of a constructed object, shared by reference counting.
///
/// This is implemented by `Arc<T>` only. Cloning the handle never clones the
/// object, so every clone points to the same instance.
pub(crate) trait SharedManaged: AsAny + Send + Sync {
    fn dyn_clone(&self) -> Box<dyn SharedManaged>;
}

impl<T> SharedManaged for Arc<T>
where
    T: Managed + ?Sized,
{
    fn dyn_clone(&self) -> Box<dyn SharedManaged> {
        Box::new(Arc::clone(self))
    }
}
