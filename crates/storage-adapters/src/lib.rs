//! # storage-adapters
//!
//! [`KeyValueStorage`] implementations: a JSON file on disk for the binary
//! and an in-memory map for tests and ephemeral sessions.
//!
//! [`KeyValueStorage`]: domains::KeyValueStorage

pub mod file;
pub mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
