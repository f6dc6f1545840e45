//! Storage Adapters
//!
//! Implementations of the StateStore port for persisting the cycle state.
//!
//! ## Available Adapters
//!
//! - **FileStateStore** - Stores state as JSON documents on disk
//! - **InMemoryStateStore** - Stores state in memory (testing/dry runs)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStateStore, InMemoryStateStore};
//!
//! // Production: file-based storage
//! let store = FileStateStore::new("./data/state");
//!
//! // Testing: in-memory storage
//! let store = InMemoryStateStore::new();
//! ```

mod file_state_store;
mod in_memory_state_store;

pub use file_state_store::FileStateStore;
pub use in_memory_state_store::InMemoryStateStore;
