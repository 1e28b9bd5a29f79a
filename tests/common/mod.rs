//! Shared fixtures for store integration tests

use treestore::{HierarchicalStore, MemoryBackend, PathValue, Result};

/// A store over a fresh in-memory tree
#[allow(dead_code)]
pub fn empty_store() -> Result<HierarchicalStore<MemoryBackend>> {
    HierarchicalStore::new(MemoryBackend::new())
}

/// A store pre-populated with `(path, contents)` pairs
#[allow(dead_code)]
pub async fn seeded_store(files: &[(&str, &str)]) -> Result<HierarchicalStore<MemoryBackend>> {
    let store = HierarchicalStore::new(MemoryBackend::new())?;
    for (path, contents) in files {
        store.write(&PathValue::new(path), contents).await?;
    }
    Ok(store)
}
