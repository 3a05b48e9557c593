//! Action record storage.

mod memory;

pub use memory::InMemoryActionStore;
