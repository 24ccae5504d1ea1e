pub mod args;
pub mod bootstrap;
pub mod config;
pub mod container;
pub mod engine;
pub mod errors;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::AppConfig;
pub use container::{Container, ContainerError, Lookup, ServiceConstructorMap, ServiceName};
pub use errors::AppError;
