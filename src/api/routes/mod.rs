//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`deck`] — Package generation
//! - [`system`] — Health and OpenAPI

mod deck;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use deck::*;
pub use system::*;
