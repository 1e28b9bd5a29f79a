//! Directory listing elements

use crate::path::PathValue;
use crate::traits::EntryKind;

/// A single listing result: name, kind, and full path from the queried root
///
/// Produced transiently by [`HierarchicalStore::list`](crate::HierarchicalStore::list);
/// the store does not retain entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// True when the entry is a directory
    pub is_folder: bool,
    /// The leaf segment only
    pub name: String,
    /// The queried path joined with the leaf name
    pub path: PathValue,
}

impl Entry {
    pub(crate) fn new(name: String, kind: EntryKind, path: PathValue) -> Self {
        Entry {
            is_folder: kind.is_directory(),
            name,
            path,
        }
    }
}
