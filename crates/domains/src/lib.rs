//! blog-admin/crates/domains/src/lib.rs
//!
//! Domain models, port traits and error types for the blog admin client.
//! Nothing in this crate performs I/O; adapters implement the ports.

pub mod errors;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
