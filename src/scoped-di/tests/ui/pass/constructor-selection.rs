use std::sync::Arc;

use scoped_di::prelude::*;

#[derive(Component)]
pub struct Config;

pub struct Cache;

#[component]
impl Cache {
    pub fn with_capacity(_config: Arc<Config>, _capacity: Option<Arc<Config>>) -> Self {
        Self
    }

    pub fn new(_config: Arc<Config>) -> Self {
        Self
    }

    pub fn clear(&self) {}
}

pub struct Ambiguous;

#[component]
impl Ambiguous {
    pub fn from_config(_config: Arc<Config>) -> Self {
        Self
    }

    pub fn from_cache(_cache: Arc<Cache>) -> Self {
        Self
    }
}

pub struct Generic<T> {
    _value: Arc<T>,
}

#[component]
impl<T> Generic<T>
where
    T: Injectable,
{
    pub fn new(value: Arc<T>) -> Self {
        Self { _value: value }
    }
}

fn main() {
    let container = Container::new();
    container.provide::<Cache>(Scope::Local).unwrap();
    container.provide::<Generic<Config>>(Scope::Local).unwrap();
    assert!(container.try_require::<Ambiguous>().is_none());
}
