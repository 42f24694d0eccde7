use std::any;
use std::error::Error;

use tracing::warn;

use crate::builder::{self, Builder, Component};
use crate::container::registry::RegistryError;
use crate::container::{Container, Managed};
use crate::key;
use crate::module::Module;
use crate::scope::Scope;

/// Collects the registrations of [`Module`]s into a root [`Container`].
///
/// Errors are recorded instead of stopping the configuration, so that every
/// problem is reported at once by [`Container::init`].
pub struct Configurer {
    container: Container,
    errors: Vec<RegistryError>,
}

impl Configurer {
    pub(crate) fn new(container: Container) -> Self {
        Self {
            container,
            errors: Vec::new(),
        }
    }

    /// Returns the container being configured, which already holds every
    /// object provided so far.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Provides `T` with its automatically derived builder. See
    /// [`Container::provide`].
    pub fn provide<T>(&mut self, scope: Scope)
    where
        T: Component,
    {
        self.provide_with(builder::as_::<T>(), scope);
    }

    /// Provides `T` with an explicit builder. See [`Container::provide_with`].
    pub fn provide_with<T>(&mut self, builder: Builder<T>, scope: Scope)
    where
        T: Managed + ?Sized,
    {
        if let Err(source) = self.container.provide_with(builder, scope) {
            let key = key::of::<T>();
            warn!(%key, error = %source, "could not provide an object");
            self.errors.push(RegistryError::Provide { key, source });
        }
    }

    /// Records an error of `module` which is not caused by any registration.
    pub fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>) {
        warn!(module, error = %err, "module fails to setup the configuration");
        self.errors.push(RegistryError::ModuleInner {
            module,
            source: err,
        });
    }

    /// Runs `module` against `self`, recording the error it returns.
    pub fn setup<M>(&mut self, module: &M)
    where
        M: Module,
    {
        self.setup_named(any::type_name::<M>(), module);
    }

    pub(crate) fn setup_named(&mut self, name: &'static str, module: &dyn Module) {
        if let Err(err) = module.configure(self) {
            self.report_module_error(name, err);
        }
    }

    pub(crate) fn finish(self) -> Result<Container, RegistryError> {
        if self.errors.is_empty() {
            Ok(self.container)
        } else {
            Err(RegistryError::Aggregated {
                errors: self.errors,
            })
        }
    }
}
