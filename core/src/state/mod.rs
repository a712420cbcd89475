mod registry;

pub use registry::ActorRegistry;
