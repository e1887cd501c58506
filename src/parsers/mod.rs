mod debug;
pub mod node_builder;
mod registry;

pub use debug::LogObserver;
pub use node_builder::{add_property, set_property, start_node};
pub use registry::ResourceRegistry;
