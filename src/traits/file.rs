//! FileHandle and WriteStream traits

use crate::error::Result;

/// An opaque reference to a leaf file in the backend tree
pub trait FileHandle: Clone + Send + Sync + 'static {
    /// The write stream type for this file
    type Writer: WriteStream;

    /// Open a write stream over this file
    ///
    /// With `keep_existing_data` false the file is truncated; otherwise the
    /// stream starts from the current contents.
    ///
    /// # Errors
    ///
    /// Fails on backend I/O errors.
    async fn open_writable(&self, keep_existing_data: bool) -> Result<Self::Writer>;

    /// Read the full contents into a byte buffer
    ///
    /// # Errors
    ///
    /// Fails on backend I/O errors.
    async fn read_all(&self) -> Result<Vec<u8>>;
}

/// A write stream obtained from [`FileHandle::open_writable`]
///
/// Data is not guaranteed visible until [`close`](Self::close) returns.
pub trait WriteStream {
    /// Append a chunk of bytes to the stream
    ///
    /// # Errors
    ///
    /// Fails on backend I/O errors.
    async fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flush and commit the stream
    ///
    /// # Errors
    ///
    /// Fails on backend I/O errors.
    async fn close(self) -> Result<()>;
}
