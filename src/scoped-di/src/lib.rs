#![allow(clippy::new_without_default)]

pub mod builder;
pub mod container;
pub mod key;
pub mod module;
pub mod scope;
mod util;

pub use scoped_di_derive::{component, Component};

pub mod prelude {
    pub use crate::builder::{as_, Builder, Component, Implements, Injectable, Parameter, Provided};
    pub use crate::container::registry::{Configurer, RegistryError};
    pub use crate::container::{Container, ContainerError};
    pub use crate::key;
    pub use crate::module::{bind, Configuration, Module};
    pub use crate::scope::Scope;
    pub use crate::{component, interface, Component};
}
