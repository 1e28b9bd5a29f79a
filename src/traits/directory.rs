//! DirectoryHandle trait and entry descriptors

use crate::error::Result;

use super::FileHandle;

/// Kind discriminator in a directory entry descriptor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A leaf byte-blob
    File,
    /// A named, nested container
    Directory,
}

impl EntryKind {
    /// True for [`EntryKind::File`]
    #[must_use]
    pub fn is_file(self) -> bool {
        self == EntryKind::File
    }

    /// True for [`EntryKind::Directory`]
    #[must_use]
    pub fn is_directory(self) -> bool {
        self == EntryKind::Directory
    }
}

/// An opaque reference to a directory in the backend tree
///
/// Handles are cheap to clone and valid only within the resolving call.
/// Opening a child that does not exist (without `create`) fails with
/// `NotFound`; the store decides at each boundary whether absence is an
/// error or an empty result.
pub trait DirectoryHandle: Clone + Send + Sync + 'static {
    /// The file handle type produced by this directory
    type File: FileHandle;

    /// Open (or create) a child directory by name
    ///
    /// # Errors
    ///
    /// Fails when the child is missing and `create` is false, or when the
    /// name denotes a file.
    async fn open_directory(&self, name: &str, create: bool) -> Result<Self>;

    /// Open (or create) a child file by name
    ///
    /// # Errors
    ///
    /// Fails when the child is missing and `create` is false, or when the
    /// name denotes a directory.
    async fn open_file(&self, name: &str, create: bool) -> Result<Self::File>;

    /// Enumerate direct children as `(name, kind)` pairs
    ///
    /// Each invocation performs a fresh read. Ordering is backend-defined
    /// and not guaranteed stable across calls.
    ///
    /// # Errors
    ///
    /// Fails on backend I/O errors.
    async fn entries(&self) -> Result<Vec<(String, EntryKind)>>;

    /// Remove a direct child by name
    ///
    /// With `recursive`, a directory child is removed with its whole
    /// subtree; without it, removing a non-empty directory fails.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` when no such child exists.
    async fn remove_entry(&self, name: &str, recursive: bool) -> Result<()>;
}
