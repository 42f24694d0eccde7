use crate::builder::Builder;
use crate::container::registry::Configurer;
use crate::container::Managed;
use crate::scope::Scope;

/// A binding of `T` to a concrete [`Builder`].
pub struct BuilderBinding<T>
where
    T: Managed + ?Sized,
{
    builder: Builder<T>,
    scope: Scope,
}

impl<T> BuilderBinding<T>
where
    T: Managed + ?Sized,
{
    pub(super) fn new(builder: Builder<T>, scope: Scope) -> Self {
        Self { builder, scope }
    }

    pub fn within(self, scope: Scope) -> Self {
        Self::new(self.builder, scope)
    }

    pub fn set_on(self, configurer: &mut Configurer) {
        configurer.provide_with(self.builder, self.scope);
    }
}
