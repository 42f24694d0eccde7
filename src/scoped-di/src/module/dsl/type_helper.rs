use std::marker::PhantomData;

use crate::builder::{self, Builder, Closure, Component, Implements};
use crate::container::registry::Configurer;
use crate::container::Managed;
use crate::module::dsl::BuilderBinding;
use crate::scope::Scope;

/// A binding of `T` which doesn't specify its builder yet.
pub struct TypeBinding<T>
where
    T: Managed + ?Sized,
{
    scope: Scope,
    _marker: PhantomData<T>,
}

impl<T> TypeBinding<T>
where
    T: Managed + ?Sized,
{
    pub(super) fn new(scope: Scope) -> Self {
        Self {
            scope,
            _marker: PhantomData,
        }
    }

    pub fn within(self, scope: Scope) -> Self {
        Self::new(scope)
    }

    pub fn to_builder(self, builder: Builder<T>) -> BuilderBinding<T> {
        BuilderBinding::new(builder, self.scope)
    }

    /// Binds the interface `T` to the automatically derived builder of `C`.
    pub fn to_implementation<C>(self) -> BuilderBinding<T>
    where
        C: Component + Implements<T>,
    {
        BuilderBinding::new(builder::as_::<C>().upcast(), self.scope)
    }
}

impl<T> TypeBinding<T>
where
    T: Managed,
{
    pub fn to_value(self, value: T) -> BuilderBinding<T>
    where
        T: Clone,
    {
        BuilderBinding::new(Builder::from_value(value), self.scope)
    }

    pub fn to_closure<C, D>(self, closure: C) -> BuilderBinding<T>
    where
        C: Closure<D, Constructed = T>,
        D: Send + Sync + 'static,
    {
        BuilderBinding::new(Builder::from_closure(closure), self.scope)
    }
}

impl<T> TypeBinding<T>
where
    T: Component,
{
    /// Binds `T` to its own automatically derived builder.
    pub fn set_on(self, configurer: &mut Configurer) {
        configurer.provide::<T>(self.scope);
    }
}
