//! Capability traits for storage backends
//!
//! These traits are the sole boundary between the store and its storage
//! engine. A backend supplies a root directory handle; directory handles
//! open children, enumerate entries, and remove them; file handles stream
//! reads and writes. Handles are opaque and valid only within the resolving
//! call; the store never caches them, except for the memoized root.

pub mod backend;
pub mod directory;
pub mod file;

pub use backend::StorageBackend;
pub use directory::{DirectoryHandle, EntryKind};
pub use file::{FileHandle, WriteStream};
