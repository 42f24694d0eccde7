//! A small DSL for registering builders in a [`Module`].
//!
//! ```rust
//! # use std::error::Error;
//! # use std::sync::Arc;
//! # use scoped_di::prelude::*;
//! trait Storage: Send + Sync {}
//!
//! #[derive(Component)]
//! struct Disk;
//!
//! impl Storage for Disk {}
//!
//! scoped_di::interface!(dyn Storage => [Disk]);
//!
//! struct App;
//!
//! impl Module for App {
//!     fn configure(&self, configurer: &mut Configurer) -> Result<(), Box<dyn Error + Send + Sync>> {
//!         bind::<dyn Storage>()
//!             .to_implementation::<Disk>()
//!             .within(Scope::Singleton)
//!             .set_on(configurer);
//!         bind::<u16>().to_value(8080).set_on(configurer);
//!         Ok(())
//!     }
//! }
//!
//! let container = Container::init(App).unwrap();
//! assert!(container.try_require::<dyn Storage>().is_some());
//! ```
//!
//! [`Module`]: crate::module::Module

mod builder_helper;
mod type_helper;

use crate::container::Managed;
use crate::scope::Scope;

pub use builder_helper::BuilderBinding;
pub use type_helper::TypeBinding;

/// Starts a binding of `T` with [`Scope::Local`].
pub fn bind<T>() -> TypeBinding<T>
where
    T: Managed + ?Sized,
{
    TypeBinding::new(Scope::Local)
}
