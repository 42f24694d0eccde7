use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use scoped_di::builder::{signature_of, Dependency};
use scoped_di::prelude::*;

static SERVICE_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub struct SharedService {
    id: usize,
}

#[component]
impl SharedService {
    pub fn new() -> Self {
        Self {
            id: SERVICE_COUNTER.fetch_add(1, Ordering::SeqCst),
        }
    }
}

pub struct FooBar {
    service: Arc<SharedService>,
}

#[component]
impl FooBar {
    pub fn new(service: Arc<SharedService>) -> Self {
        Self { service }
    }
}

#[test]
fn shared_service_is_shared_by_every_foobar() {
    let root = Container::new();
    root.provide::<SharedService>(Scope::Singleton).unwrap();
    root.provide::<FooBar>(Scope::Local).unwrap();

    let scope = root.create_scope();
    let a = root.require::<FooBar>().unwrap();
    let b = scope.require::<FooBar>().unwrap();
    let service = root.require::<SharedService>().unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a.service, &b.service));
    assert!(Arc::ptr_eq(&a.service, &service));
    assert_eq!(a.service.id, service.id);
}

#[test]
fn local_objects_are_isolated_between_sibling_scopes() {
    let root = Container::new();
    root.provide::<FooBar>(Scope::Local).unwrap();

    let first = root.create_scope();
    let second = root.create_scope();
    let a = first.require::<FooBar>().unwrap();
    let b = second.require::<FooBar>().unwrap();

    assert!(Arc::ptr_eq(&a, &first.require::<FooBar>().unwrap()));
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a.service, &b.service));
}

pub trait Input: Send + Sync {
    fn direction(&self) -> (i32, i32);
}

pub struct KeyboardInput;

#[component]
impl KeyboardInput {
    pub fn new() -> Self {
        Self
    }
}

impl Input for KeyboardInput {
    fn direction(&self) -> (i32, i32) {
        (1, 0)
    }
}

scoped_di::interface!(dyn Input => [KeyboardInput]);

#[derive(Component)]
pub struct Movement {
    input: Arc<dyn Input>,
}

impl Movement {
    fn step(&self, position: (i32, i32)) -> (i32, i32) {
        let (dx, dy) = self.input.direction();
        (position.0 + dx, position.1 + dy)
    }
}

#[test]
fn movement_requires_a_bound_input() {
    let container = Container::new();
    assert!(container.try_require::<Movement>().is_none());
    assert!(!container.contains::<Movement>());

    let err = container.require::<Movement>().err().unwrap();
    assert!(matches!(
        err.root_cause(),
        ContainerError::UnresolvedInterfaceDependency { .. }
    ));

    container
        .provide_with::<dyn Input>(as_::<KeyboardInput>().upcast(), Scope::Local)
        .unwrap();
    let movement = container.require::<Movement>().unwrap();
    assert_eq!(movement.step((0, 0)), (1, 0));
}

#[test]
fn signature_of_reports_constructor_parameters() {
    let signature = signature_of::<Movement>().unwrap();
    assert_eq!(
        signature.parameters(),
        &[Dependency::required(key::of::<dyn Input>())]
    );
    assert_eq!(signature_of::<SharedService>().unwrap().arity(), 0);
    assert!(signature_of::<dyn Input>().is_err());
}

#[derive(Debug)]
pub struct InvalidPort(u32);

impl Display for InvalidPort {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "invalid port {}", self.0)
    }
}

impl Error for InvalidPort {}

pub struct Server;

#[component]
impl Server {
    pub fn new() -> Result<Self, InvalidPort> {
        Err(InvalidPort(70000))
    }
}

#[test]
fn failed_construction_registers_nothing() {
    let container = Container::new();
    let err = container.provide::<Server>(Scope::Singleton).unwrap_err();
    assert!(matches!(err, ContainerError::ObjectConstruction { .. }));
    assert!(!container.contains::<Server>());

    assert!(container.try_require::<Server>().is_none());
    assert!(!container.contains::<Server>());
}

pub struct Session {
    user: Option<Arc<User>>,
}

#[component]
impl Session {
    pub fn new(user: Option<Arc<User>>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

pub struct User;

#[component]
impl User {
    pub fn guest() -> Self {
        Self
    }

    pub fn admin() -> Self {
        Self
    }
}

#[test]
fn ambiguous_types_need_an_explicit_builder() {
    let container = Container::new();

    let session = container.require::<Session>().unwrap();
    assert!(session.user.is_none());

    let err = container.require::<User>().err().unwrap();
    assert!(matches!(
        err.root_cause(),
        ContainerError::AmbiguousConstructor { arity: 0, .. }
    ));

    let scope = container.create_scope();
    scope
        .provide_with(Builder::new(|_| Ok(User::admin())), Scope::Local)
        .unwrap();
    assert!(scope.try_require::<User>().is_some());
    assert!(container.try_require::<User>().is_none());
}

#[test]
fn nested_scopes_keep_singletons_and_rebuild_locals() {
    let root = Container::new();
    root.provide::<SharedService>(Scope::Singleton).unwrap();
    root.provide::<FooBar>(Scope::Local).unwrap();

    let mut current = root.clone();
    let mut foobars = vec![root.require::<FooBar>().unwrap()];
    for depth in 1..=3 {
        current = current.create_scope();
        assert_eq!(current.depth(), depth);
        foobars.push(current.require::<FooBar>().unwrap());
    }

    for pair in foobars.windows(2) {
        assert!(!Arc::ptr_eq(&pair[0], &pair[1]));
        assert!(Arc::ptr_eq(&pair[0].service, &pair[1].service));
    }
}

#[test]
fn singletons_outlive_the_container_that_built_them() {
    let root = Container::new();
    root.provide::<SharedService>(Scope::Singleton).unwrap();
    let scope = root.create_scope();
    let service = root.require::<SharedService>().unwrap();

    drop(root);
    assert!(scope.parent().is_none());
    assert!(Arc::ptr_eq(&service, &scope.require::<SharedService>().unwrap()));
}

#[derive(Component)]
pub struct Database {
    url: Provided<String>,
    pool_size: Option<Provided<u16>>,
}

pub struct Repository {
    database: Arc<Database>,
    table: Provided<str>,
}

#[component]
impl Repository {
    pub fn new(database: Arc<Database>, table: Provided<str>) -> Self {
        Self { database, table }
    }
}

#[test]
fn explicitly_provided_foreign_types_are_injected() {
    let root = Container::new();
    root.provide_with(Builder::from_value(String::from("postgres://localhost")), Scope::Singleton)
        .unwrap();
    root.provide_with::<str>(Builder::from_fn(|_| Ok(Arc::from("users"))), Scope::Local)
        .unwrap();

    let scope = root.create_scope();
    let repository = scope.require::<Repository>().unwrap();
    assert_eq!(repository.database.url.as_str(), "postgres://localhost");
    assert!(repository.database.pool_size.is_none());
    assert_eq!(&*repository.table, "users");
    assert!(Arc::ptr_eq(
        &repository.database.url.clone().into_inner(),
        &root.lookup::<String>().unwrap()
    ));

    let err = Container::new().require::<Database>().err().unwrap();
    assert!(matches!(
        err.root_cause(),
        ContainerError::NotProvided { key: k, .. } if *k == key::of::<String>()
    ));
}

static CONNECTION_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub struct Connection {
    attempt: usize,
}

#[derive(Component)]
pub struct Pool {
    connection: Provided<Connection>,
}

#[test]
fn failed_lazy_construction_leaves_no_instance_in_the_scope() {
    let root = Container::new();
    root.provide_with(
        Builder::new(|_| {
            let attempt = CONNECTION_ATTEMPTS.fetch_add(1, Ordering::SeqCst);
            if attempt == 0 {
                Ok(Connection { attempt })
            } else {
                Err(ContainerError::object_construction::<Connection, _>(format!(
                    "attempt {attempt} is refused"
                )))
            }
        }),
        Scope::Local,
    )
    .unwrap();

    let scope = root.create_scope();
    assert!(scope.contains::<Connection>());
    assert_eq!(scope.scope_of::<Connection>(), None);

    assert!(scope.lookup::<Connection>().is_none());
    assert_eq!(scope.scope_of::<Connection>(), None);

    let err = scope.require::<Pool>().err().unwrap();
    let ContainerError::ObjectConstruction { key: k, .. } = err.root_cause() else {
        panic!("the connection should fail to be constructed");
    };
    assert_eq!(*k, key::of::<Connection>());
    assert_eq!(
        err.root_cause().source().map(ToString::to_string),
        Some("attempt 2 is refused".to_string())
    );
    assert!(!scope.contains::<Pool>());
    assert_eq!(scope.scope_of::<Connection>(), None);

    assert_eq!(root.lookup::<Connection>().unwrap().attempt, 0);
    assert_eq!(root.scope_of::<Connection>(), Some(Scope::Local));
}
