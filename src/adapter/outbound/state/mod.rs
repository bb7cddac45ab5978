//! Notification record persistence.

pub mod json;
pub mod lock;
pub mod memory;

pub use json::JsonFileStore;
pub use lock::CycleLock;
pub use memory::MemoryStore;
