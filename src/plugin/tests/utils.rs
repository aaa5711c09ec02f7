//! Plugin Test Utilities
//!
//! Mock plugins and a sample capability shared across test modules.

use crate::plugin::creator::PluginCreator;
use crate::plugin::registry::Registry;
use crate::plugin::types::PluginIdentity;
use std::cell::Cell;
use std::rc::Rc;

pub const EXAMPLE: &str = "Example";

/// Plain plugin carrying only its identity and a payload tag
#[derive(Debug)]
pub struct MockPlugin {
    pub identity: PluginIdentity,
    pub tag: &'static str,
}

impl MockPlugin {
    pub fn new(server: &str, name: &str, version: i32) -> Self {
        Self {
            identity: PluginIdentity::new(server, name, version),
            tag: "",
        }
    }

    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }
}

crate::impl_plugin!(MockPlugin);

/// Another plugin type, for narrowing mismatches
#[derive(Debug)]
pub struct OtherPlugin {
    pub identity: PluginIdentity,
}

impl OtherPlugin {
    pub fn new(server: &str, name: &str, version: i32) -> Self {
        Self {
            identity: PluginIdentity::new(server, name, version),
        }
    }
}

crate::impl_plugin!(OtherPlugin);

/// Plugin that counts its drops into a shared cell
pub struct DropCounter {
    pub identity: PluginIdentity,
    pub drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new(name: &str, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            identity: PluginIdentity::new(EXAMPLE, name, 1),
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

crate::impl_plugin!(DropCounter);

/// Sample capability in the shape hosts define
pub trait ExampleType {
    fn name(&self) -> String;
    fn do_something(&self) -> i32;
}

pub type ExampleTypeCreator = PluginCreator<dyn ExampleType>;

pub struct Person {
    pub name: String,
    pub age: i32,
}

impl ExampleType for Person {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn do_something(&self) -> i32 {
        self.age
    }
}

pub fn person_creator(name: &str, age: i32) -> ExampleTypeCreator {
    let person_name = name.to_string();
    PluginCreator::<dyn ExampleType>::new(EXAMPLE, format!("{}Plugin", name), 1, move || {
        Box::new(Person {
            name: person_name.clone(),
            age,
        })
    })
}

/// Registration function shaped like a module entry point
pub fn register_two_people(registry: &mut Registry) {
    registry.submit(person_creator("Alice", 56)).unwrap();
    registry.submit(person_creator("William", 30)).unwrap();
}
