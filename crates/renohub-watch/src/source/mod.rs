//! Project snapshot sources.

pub mod memory;

pub use memory::MemoryProjectStore;
