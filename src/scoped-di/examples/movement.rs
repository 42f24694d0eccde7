use std::error::Error;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use scoped_di::prelude::*;

fn main() {
    let game = Container::init(GameModule::new("demo")).unwrap();

    for level in 1..=2 {
        let scope = game.create_scope();
        let movement = scope.require::<Movement>().unwrap();
        for _ in 0..3 {
            movement.step();
        }
        movement.report(level);
    }
}

struct GameModule {
    name: &'static str,
}

impl GameModule {
    fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Module for GameModule {
    fn configure(&self, configurer: &mut Configurer) -> Result<(), Box<dyn Error + Send + Sync>> {
        let name = self.name;
        bind::<dyn Logger>()
            .to_builder(Builder::<dyn Logger>::from_fn(move |_| {
                Ok(Arc::new(ConsoleLogger { name }))
            }))
            .within(Scope::Singleton)
            .set_on(configurer);

        bind::<dyn Input>()
            .to_implementation::<KeyboardInput>()
            .set_on(configurer);

        bind::<Movement>().set_on(configurer);

        Ok(())
    }
}

trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

struct ConsoleLogger {
    name: &'static str,
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        eprintln!("[{}] {}", self.name, message);
    }
}

trait Input: Send + Sync {
    fn direction(&self) -> (i32, i32);
}

struct KeyboardInput {
    logger: Arc<dyn Logger>,
}

#[component]
impl KeyboardInput {
    fn new(logger: Arc<dyn Logger>) -> Self {
        logger.log("keyboard attached");
        Self { logger }
    }
}

impl Input for KeyboardInput {
    fn direction(&self) -> (i32, i32) {
        self.logger.log("key pressed: right");
        (1, 0)
    }
}

scoped_di::interface! {
    dyn Logger => [],
    dyn Input => [KeyboardInput],
}

struct Movement {
    input: Arc<dyn Input>,
    logger: Arc<dyn Logger>,
    x: AtomicI32,
    y: AtomicI32,
}

#[component]
impl Movement {
    fn new(input: Arc<dyn Input>, logger: Arc<dyn Logger>) -> Self {
        Self {
            input,
            logger,
            x: AtomicI32::new(0),
            y: AtomicI32::new(0),
        }
    }

    fn step(&self) {
        let (dx, dy) = self.input.direction();
        self.x.fetch_add(dx, Ordering::Relaxed);
        self.y.fetch_add(dy, Ordering::Relaxed);
    }

    fn report(&self, level: u32) {
        let x = self.x.load(Ordering::Relaxed);
        let y = self.y.load(Ordering::Relaxed);
        self.logger.log(&format!("level {level} ends at ({x}, {y})"));
    }
}
