//! Backend implementations of the storage capability traits
//!
//! The store treats backends as external collaborators; this module ships
//! one reference implementation, [`MemoryBackend`], so the store is usable
//! and testable without a platform filesystem.

pub mod memory;

pub use memory::MemoryBackend;
