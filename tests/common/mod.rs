//! Common test utilities shared by the integration tests

use dpf::plugin::api::{PluginCreator, PluginIdentity, Registry};

pub const EXAMPLE: &str = "Example";

pub trait Greeter {
    fn greet(&self) -> String;
}

pub type GreeterCreator = PluginCreator<dyn Greeter>;

struct Named(String);

impl Greeter for Named {
    fn greet(&self) -> String {
        format!("{} says hi", self.0)
    }
}

/// Creator for a greeter called `name`, registered as `<name>Plugin`
pub fn greeter(name: &str, version: i32) -> GreeterCreator {
    let who = name.to_string();
    PluginCreator::<dyn Greeter>::new(EXAMPLE, format!("{}Plugin", name), version, move || {
        Box::new(Named(who.clone()))
    })
}

/// Identity-only plugin
pub struct Bare {
    pub identity: PluginIdentity,
}

dpf::impl_plugin!(Bare);

impl Bare {
    pub fn new(server: &str, name: &str, version: i32) -> Self {
        Self {
            identity: PluginIdentity::new(server, name, version),
        }
    }
}

/// Stand-in for a module entry point that submits two creators
pub fn register_pair(registry: &mut Registry) {
    registry.submit(greeter("Bob", 1)).unwrap();
    registry.submit(greeter("Alice", 1)).unwrap();
}
