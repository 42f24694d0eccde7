use std::sync::Arc;

use scoped_di::prelude::*;

#[derive(Component)]
pub struct Unit;

#[derive(Component)]
pub struct Tuple(pub Arc<Unit>, pub Option<Arc<Unit>>);

#[derive(Component)]
pub struct Named {
    pub unit: Arc<Unit>,
    pub tuple: Arc<Tuple>,
}

#[derive(Component)]
pub struct Wrapper<T: Injectable> {
    pub inner: Arc<T>,
}

fn main() {
    let container = Container::new();
    let named = container.require::<Named>().unwrap();
    assert!(Arc::ptr_eq(&named.unit, &named.tuple.0));
    assert!(container.require::<Wrapper<Named>>().is_ok());
}
