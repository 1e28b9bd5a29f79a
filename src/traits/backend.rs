//! StorageBackend trait: the entry point of the capability set

use crate::error::Result;

use super::{DirectoryHandle, FileHandle};

/// A storage engine exposing a handle-based capability set
///
/// Implementations map the store's logical tree onto whatever medium they
/// own: a platform filesystem, an in-memory tree, a browser-native
/// origin-private store. The store resolves every operation by walking
/// directory handles down from [`open_root`](Self::open_root).
///
/// # Availability
///
/// [`check`](Self::check) runs once, at store construction. A backend whose
/// capability set is absent must fail there; the store refuses to operate
/// in a degraded mode.
pub trait StorageBackend: Send + Sync + 'static {
    /// The directory handle type for this backend
    type Directory: DirectoryHandle<File = Self::File>;

    /// The file handle type for this backend
    type File: FileHandle;

    /// Verify the backend's capability set is present and usable
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BackendUnavailable`](crate::StoreError::BackendUnavailable)
    /// when the backend cannot operate.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Open the root directory handle
    ///
    /// Idempotent; the store memoizes the result for its lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be opened.
    async fn open_root(&self) -> Result<Self::Directory>;
}
