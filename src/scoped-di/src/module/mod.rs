pub mod dsl;

use std::any;
use std::error::Error;

use crate::container::registry::Configurer;

pub use dsl::bind;

/// A unit of container configuration.
///
/// A [`Module`] registers builders on a [`Configurer`]. Registrations which
/// fail are recorded by the [`Configurer`] itself, so `configure` only has
/// to return the errors which are not caused by any registration.
///
/// # Examples
///
/// ```rust
/// # use std::error::Error;
/// # use std::sync::Arc;
/// # use scoped_di::prelude::*;
/// #[derive(Component)]
/// struct Database;
///
/// struct Persistence;
///
/// impl Module for Persistence {
///     fn configure(&self, configurer: &mut Configurer) -> Result<(), Box<dyn Error + Send + Sync>> {
///         bind::<Database>().within(Scope::Singleton).set_on(configurer);
///         Ok(())
///     }
/// }
///
/// let container = Container::init(Persistence).unwrap();
/// assert_eq!(container.scope_of::<Database>(), Some(Scope::Singleton));
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Module: 'static {
    /// Registers builders on `configurer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the module can't finish its configuration for
    /// reasons other than a failed registration.
    fn configure(&self, configurer: &mut Configurer) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// A [`Module`] composed of other modules, which are configured in the order
/// they are added.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<(&'static str, Box<dyn Module>)>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push((any::type_name::<M>(), Box::new(module)));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }
}

impl Module for Configuration {
    fn configure(&self, configurer: &mut Configurer) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.modules
            .iter()
            .for_each(|(name, module)| configurer.setup_named(*name, module.as_ref()));
        Ok(())
    }
}
