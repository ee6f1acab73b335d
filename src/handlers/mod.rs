//! Handler implementations

pub mod context;
pub mod json;
pub mod writer;

pub use context::ContextHandler;
pub use json::JsonHandler;
pub use writer::SharedWriter;

// Re-export the trait for convenience
pub use crate::core::Handler;
