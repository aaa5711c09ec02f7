//! Capability shared by the example host and the example plugin module.

use dpf::plugin::api::PluginCreator;

/// Server the example plugins register into
pub const SERVER_NAME: &str = "Example";

/// Version of the `ExampleType` contract
pub const VERSION: i32 = 1;

pub trait ExampleType {
    fn name(&self) -> String;
    fn do_something(&self) -> i32;
}

/// Factory the module registers for each `ExampleType` implementation
pub type ExampleTypeCreator = PluginCreator<dyn ExampleType>;

/// Build a creator in the `Example` server at the current contract version
pub fn example_creator<F>(name: impl Into<String>, factory: F) -> ExampleTypeCreator
where
    F: Fn() -> Box<dyn ExampleType> + 'static,
{
    PluginCreator::new(SERVER_NAME, name, VERSION, factory)
}
