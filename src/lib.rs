//! # treestore
//!
//! Path algebra and a hierarchical storage provider over pluggable,
//! handle-based storage backends.
//!
//! The crate has two tightly coupled halves:
//!
//! - [`PathValue`]: an immutable, `/`-separated path value type with
//!   normalization, decomposition, relative-path computation, and
//!   join/concat algebra. Pure string manipulation; never fails.
//! - [`HierarchicalStore`]: resolves paths to backend handle chains and
//!   performs listing, existence checks, reads, writes, recursive deletes,
//!   empty-directory pruning, and concurrent recursive moves.
//!
//! Storage engines plug in through the [`traits`] capability set
//! ([`StorageBackend`], [`DirectoryHandle`], [`FileHandle`],
//! [`WriteStream`]). The crate ships [`MemoryBackend`] as a reference
//! implementation; platform or remote backends live with their owners.
//!
//! ## Example
//!
//! ```
//! use treestore::{HierarchicalStore, MemoryBackend, PathValue};
//!
//! #[compio::main]
//! async fn main() -> treestore::Result<()> {
//!     let store = HierarchicalStore::new(MemoryBackend::new())?;
//!
//!     let note = PathValue::new("notes/today.md");
//!     store.write(&note, "remember the milk").await?;
//!
//!     assert!(store.exists(&note).await);
//!     for entry in store.list(&PathValue::new("notes")).await? {
//!         println!("{} (folder: {})", entry.path, entry.is_folder);
//!     }
//!
//!     store.move_entry(&note, &PathValue::new("archive/today.md")).await?;
//!     assert_eq!(store.read(&PathValue::new("archive/today.md")).await?, "remember the milk");
//!     Ok(())
//! }
//! ```
//!
//! ## Semantics worth knowing
//!
//! - Absence is not an error at most boundaries: `list` returns an empty
//!   listing, `exists` answers `false`, `delete` logs and succeeds. Only
//!   `read`/`read_as_binary` surface [`StoreError::NotFound`].
//! - Multi-entry operations are not transactional. A directory move fans
//!   out per child and accepts partial completion; per-child failures are
//!   logged, not escalated.
//! - Logging goes through [`tracing`]; no subscriber is installed here.

#![allow(async_fn_in_trait)]
#![warn(missing_docs)]

pub mod backends;
pub mod entry;
pub mod error;
pub mod path;
pub mod store;
pub mod traits;

pub use backends::MemoryBackend;
pub use entry::Entry;
pub use error::{Result, StoreError};
pub use path::PathValue;
pub use store::{HierarchicalStore, IdentitySource};
pub use traits::{DirectoryHandle, EntryKind, FileHandle, StorageBackend, WriteStream};
