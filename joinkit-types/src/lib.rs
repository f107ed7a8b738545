pub mod errors;
pub mod models;
pub mod relation;
pub mod types;

// Re-exports
pub use indexmap;
pub use ordered_float;
pub use prettytable;
pub use schemars;
pub use serde;
pub use serde_json;
pub use serde_yaml;
pub use thiserror;
pub use tracing;
