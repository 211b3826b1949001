// Adapters layer: concrete data stores behind the DataStore port.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;
