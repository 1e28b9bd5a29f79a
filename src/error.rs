//! Error types for store and backend operations
//!
//! Absence is not an error at most boundaries: `exists` and `list` swallow
//! missing-path conditions, and `delete` downgrades them to a logged warning.
//! The variants here cover the cases that *do* surface to callers: reading a
//! missing leaf, an unusable backend at construction time, and backend I/O
//! failures.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors produced by [`HierarchicalStore`](crate::HierarchicalStore) and
/// backend implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A path did not resolve to any directory or file handle
    ///
    /// Surfaced by `read`/`read_as_binary`; other operations absorb this
    /// condition per their documented policy.
    #[error("entry not found: {path}")]
    NotFound {
        /// The path that failed to resolve
        path: String,
    },

    /// The backend capability set is not present or failed to initialize
    ///
    /// Fatal at store construction time; the store never operates degraded.
    #[error("storage backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A backend operation failed for a reason other than absence
    #[error("backend operation failed: {0}")]
    Backend(String),

    /// File contents could not be decoded as UTF-8 text
    #[error("file at {path} is not valid UTF-8")]
    InvalidUtf8 {
        /// The path of the offending file
        path: String,
        /// The underlying decode error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl StoreError {
    /// True when the error denotes absence rather than failure
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
