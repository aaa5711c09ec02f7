//! Example plugin module
//!
//! Built as a `cdylib`, it exports `register_dpf_package` and registers one
//! fixed plugin and three parameterised ones into the `Example` server.
//! Rejected submissions are logged through the host's logger.

use dpf::plugin::api::Registry;
use example_interface::{example_creator, ExampleType};

pub struct Bob;

impl ExampleType for Bob {
    fn name(&self) -> String {
        "Bob".to_string()
    }

    fn do_something(&self) -> i32 {
        15
    }
}

pub struct Person {
    name: String,
    age: i32,
}

impl ExampleType for Person {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn do_something(&self) -> i32 {
        self.age
    }
}

fn person(name: &str, age: i32) -> dpf::plugin::api::PluginCreator<dyn ExampleType> {
    let person_name = name.to_string();
    example_creator(format!("{}Plugin", name), move || {
        Box::new(Person {
            name: person_name.clone(),
            age,
        })
    })
}

/// Registration function run by the generated entry point
pub fn register(registry: &mut Registry) {
    let creators = [
        example_creator("BobPlugin", || Box::new(Bob)),
        person("Alice", 56),
        person("William", 30),
        person("Billiam", 30),
    ];

    for creator in creators {
        if let Err(e) = registry.submit(creator) {
            log::warn!("example plugin not registered: {}", e);
        }
    }
}

dpf::export_plugins!(register);
