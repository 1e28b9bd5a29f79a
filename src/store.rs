//! Hierarchical storage provider over a handle-based backend
//!
//! [`HierarchicalStore`] resolves [`PathValue`] segments into backend
//! handle chains and performs CRUD, recursive move, and empty-directory
//! pruning against them. Every public operation is a self-contained
//! resolve-then-act sequence; the only persistent state is the memoized
//! root handle.
//!
//! # Absence policy
//!
//! Absence is not an error at most boundaries. `list` returns an empty
//! listing for an unresolvable path, `exists` answers `false`, and `delete`
//! downgrades a missing entry to a logged warning. Only `read` and
//! `read_as_binary` surface `NotFound` to the caller.

use std::sync::Mutex;

use futures::future::{join_all, FutureExt, LocalBoxFuture};
use tracing::{debug, info, warn};

use crate::entry::Entry;
use crate::error::{Result, StoreError};
use crate::path::PathValue;
use crate::traits::{DirectoryHandle, EntryKind, FileHandle, StorageBackend, WriteStream};

/// External provider of the opaque storage identity string
///
/// The identity names the current session or principal (a session cookie in
/// a browser deployment, a login name elsewhere). Resolution failure is
/// never an error; the store substitutes `"unknown"`.
pub trait IdentitySource: Send + Sync {
    /// The current identity, or `None` when it cannot be resolved
    fn storage_identity(&self) -> Option<String>;
}

/// Storage provider mapping logical paths onto a backend's directory tree
///
/// # Examples
///
/// ```
/// use treestore::{HierarchicalStore, MemoryBackend, PathValue};
///
/// # #[compio::main]
/// # async fn main() -> treestore::Result<()> {
/// let store = HierarchicalStore::new(MemoryBackend::new())?;
/// let path = PathValue::new("docs/readme.md");
/// store.write(&path, "hello").await?;
/// assert_eq!(store.read(&path).await?, "hello");
/// # Ok(())
/// # }
/// ```
pub struct HierarchicalStore<B: StorageBackend> {
    backend: B,
    /// Lazily memoized root handle; lives as long as the store, no teardown
    root: Mutex<Option<B::Directory>>,
    identity: Option<Box<dyn IdentitySource>>,
}

impl<B: StorageBackend> HierarchicalStore<B> {
    /// Create a store over `backend`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BackendUnavailable`] when the backend's
    /// capability set is absent; the store never operates degraded.
    pub fn new(backend: B) -> Result<Self> {
        backend.check()?;
        Ok(HierarchicalStore {
            backend,
            root: Mutex::new(None),
            identity: None,
        })
    }

    /// Create a store with an external identity provider
    ///
    /// # Errors
    ///
    /// Same construction-time policy as [`new`](Self::new).
    pub fn with_identity(backend: B, identity: Box<dyn IdentitySource>) -> Result<Self> {
        backend.check()?;
        Ok(HierarchicalStore {
            backend,
            root: Mutex::new(None),
            identity: Some(identity),
        })
    }

    /// The opaque identity of the current session or principal
    ///
    /// Falls back to `"unknown"` when no provider is configured or the
    /// provider cannot resolve one.
    #[must_use]
    pub fn identity(&self) -> String {
        self.identity
            .as_ref()
            .and_then(|source| source.storage_identity())
            .unwrap_or_else(|| "unknown".to_owned())
    }

    /// List the direct children of `path`
    ///
    /// An unresolvable path (any missing intermediate segment) yields an
    /// empty listing, not an error. Each entry's path is the queried path
    /// joined with the child name.
    ///
    /// # Errors
    ///
    /// Fails only on backend I/O errors while enumerating.
    pub async fn list(&self, path: &PathValue) -> Result<Vec<Entry>> {
        let Some(dir) = self.directory(path, false).await? else {
            return Ok(Vec::new());
        };
        let mut items = Vec::new();
        for (name, kind) in dir.entries().await? {
            let child_path = path.join(&PathValue::new(&name));
            items.push(Entry::new(name, kind, child_path));
        }
        Ok(items)
    }

    /// True when `path` resolves to a directory or file handle
    ///
    /// Resolution failures of any kind answer `false`; this never errors.
    pub async fn exists(&self, path: &PathValue) -> bool {
        if matches!(self.directory(path, false).await, Ok(Some(_))) {
            return true;
        }
        matches!(self.file(path).await, Ok(Some(_)))
    }

    /// Remove the entry at `path`, recursively for directories
    ///
    /// Root-aware: the leaf is removed from its parent directory, which for
    /// a root-level entry is the true root. A missing entry is logged as a
    /// warning and absorbed.
    ///
    /// # Errors
    ///
    /// Fails only when the root handle cannot be opened.
    pub async fn delete(&self, path: &PathValue) -> Result<()> {
        debug!("deleting {}", path);
        let Some(name) = path.name_with_extension() else {
            return Ok(());
        };
        let Some(parent) = self.parent_directory(path, false).await? else {
            warn!("entry {} not found", path);
            return Ok(());
        };
        if let Err(err) = parent.remove_entry(name, true).await {
            warn!("entry {} not found: {}", path, err);
        }
        Ok(())
    }

    /// Remove direct children of `path` that are directories with no entries
    ///
    /// Exactly one level of descent: a child directory whose own listing is
    /// empty is removed; children with content are left untouched, even if
    /// their subtrees contain empty directories deeper down. A failure on
    /// one child is logged and absorbed; the remaining siblings are still
    /// inspected.
    ///
    /// # Errors
    ///
    /// Fails only when the root handle cannot be opened or the queried
    /// directory's own listing fails.
    pub async fn prune_empty_directories(&self, path: &PathValue) -> Result<()> {
        let Some(dir) = self.directory(path, false).await? else {
            return Ok(());
        };
        for (name, kind) in dir.entries().await? {
            if kind.is_file() {
                continue;
            }
            if let Err(err) = self.prune_child(&dir, &name).await {
                warn!("failed to prune {} under {}: {}", name, path, err);
            }
        }
        Ok(())
    }

    /// Create or truncate the file at `path` and write `data` fully
    ///
    /// All missing intermediate directories along the parent chain are
    /// created. The watch hooks bracket the mutation: the active
    /// change-notification hook is suspended for the write's duration.
    ///
    /// # Errors
    ///
    /// Fails when `path` has no leaf segment or on backend I/O errors.
    pub async fn write(&self, path: &PathValue, data: impl AsRef<[u8]>) -> Result<()> {
        info!("writing file {}", path);
        self.stop_watch();
        let result = self.write_inner(path, data.as_ref()).await;
        self.start_watch();
        result
    }

    /// Read the file at `path` as UTF-8 text
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the leaf does not resolve and
    /// [`StoreError::InvalidUtf8`] when the contents are not valid text.
    pub async fn read(&self, path: &PathValue) -> Result<String> {
        let bytes = self.read_as_binary(path).await?;
        String::from_utf8(bytes).map_err(|source| StoreError::InvalidUtf8 {
            path: path.to_string(),
            source,
        })
    }

    /// Read the file at `path` as a byte buffer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the leaf does not resolve.
    /// Absence is never silently mapped to an empty buffer.
    pub async fn read_as_binary(&self, path: &PathValue) -> Result<Vec<u8>> {
        let file = self.file(path).await?.ok_or_else(|| StoreError::NotFound {
            path: path.to_string(),
        })?;
        file.read_all().await
    }

    /// Move the entry at `from` to `to`
    ///
    /// Files move as copy-then-delete, not atomically. Directories fan out
    /// one concurrent operation per child: subdirectories recurse into
    /// `to.join(name)` and are deleted from the source once their subtree
    /// settles, files move directly. A single child failure is logged and
    /// does not abort its siblings, so the overall call can succeed with
    /// the tree partially moved. The emptied top-level source directory is
    /// left in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when `from` resolves to neither a
    /// file nor a directory.
    pub async fn move_entry(&self, from: &PathValue, to: &PathValue) -> Result<()> {
        if let Some(file) = self.file(from).await? {
            return self.move_file(file, from, to).await;
        }
        let Some(dir) = self.directory(from, false).await? else {
            return Err(StoreError::NotFound {
                path: from.to_string(),
            });
        };
        self.move_directory(dir, from.clone(), to.clone()).await
    }

    /// Resume the external change-notification hook
    ///
    /// Reserved for a notification collaborator; a no-op here.
    pub fn start_watch(&self) {}

    /// Suspend the external change-notification hook
    ///
    /// Reserved for a notification collaborator; a no-op here.
    pub fn stop_watch(&self) {}

    /// Inspect one directory child and remove it if its listing is empty
    async fn prune_child(&self, dir: &B::Directory, name: &str) -> Result<()> {
        let child = dir.open_directory(name, false).await?;
        if child.entries().await?.is_empty() {
            info!("removing empty directory {}", name);
            dir.remove_entry(name, false).await?;
        }
        Ok(())
    }

    async fn write_inner(&self, path: &PathValue, data: &[u8]) -> Result<()> {
        let name = path.name_with_extension().ok_or_else(|| {
            StoreError::Backend(format!("cannot write to directory path '{path}'"))
        })?;
        let parent = self.parent_directory(path, true).await?.ok_or_else(|| {
            StoreError::Backend(format!("failed to create parent directories for '{path}'"))
        })?;
        let file = parent.open_file(name, true).await?;
        let mut stream = file.open_writable(false).await?;
        stream.write(data).await?;
        stream.close().await
    }

    /// Memoized root handle, opened lazily on first use
    async fn root(&self) -> Result<B::Directory> {
        if let Ok(guard) = self.root.lock() {
            if let Some(root) = guard.as_ref() {
                return Ok(root.clone());
            }
        }
        let root = self.backend.open_root().await?;
        if let Ok(mut guard) = self.root.lock() {
            *guard = Some(root.clone());
        }
        Ok(root)
    }

    /// Walk the handle chain for each segment of `path`
    ///
    /// Without `create`, a failure at any segment short-circuits the whole
    /// chain to `None`; with it, missing segments are created and real
    /// failures propagate.
    async fn directory(&self, path: &PathValue, create: bool) -> Result<Option<B::Directory>> {
        let mut dir = self.root().await?;
        for segment in path.value().split('/').filter(|s| !s.is_empty()) {
            dir = match dir.open_directory(segment, create).await {
                Ok(next) => next,
                Err(err) if !create => {
                    debug!("segment {} of {} did not resolve: {}", segment, path, err);
                    return Ok(None);
                }
                Err(err) => return Err(err),
            };
        }
        Ok(Some(dir))
    }

    /// Root-aware parent resolution: a root-level entry resolves to the
    /// true root handle
    async fn parent_directory(
        &self,
        path: &PathValue,
        create: bool,
    ) -> Result<Option<B::Directory>> {
        self.directory(&path.parent_directory_path(), create).await
    }

    /// Resolve the leaf file handle of `path`, `None` on any failure
    async fn file(&self, path: &PathValue) -> Result<Option<B::File>> {
        let Some(name) = path.name_with_extension() else {
            return Ok(None);
        };
        let Some(parent) = self.parent_directory(path, false).await? else {
            return Ok(None);
        };
        Ok(parent.open_file(name, false).await.ok())
    }

    async fn move_file(&self, file: B::File, from: &PathValue, to: &PathValue) -> Result<()> {
        let data = file.read_all().await?;
        self.write(to, &data).await?;
        self.delete(from).await
    }

    /// Recursive directory move with concurrent per-child fan-out
    ///
    /// Child operations settle independently via `join_all`; failures are
    /// collected, logged, and absorbed so siblings always run to
    /// completion.
    fn move_directory<'a>(
        &'a self,
        dir: B::Directory,
        from: PathValue,
        to: PathValue,
    ) -> LocalBoxFuture<'a, Result<()>> {
        async move {
            let children = dir.entries().await?;
            let mut tasks: Vec<LocalBoxFuture<'_, Result<()>>> = Vec::new();
            for (name, kind) in children {
                let src = from.join(&PathValue::new(&name));
                let dst = to.join(&PathValue::new(&name));
                match kind {
                    EntryKind::Directory => {
                        let child = dir.open_directory(&name, false).await?;
                        tasks.push(
                            async move {
                                self.move_directory(child, src.clone(), dst).await?;
                                self.delete(&src).await
                            }
                            .boxed_local(),
                        );
                    }
                    EntryKind::File => {
                        let file = dir.open_file(&name, false).await?;
                        tasks.push(
                            async move { self.move_file(file, &src, &dst).await }.boxed_local(),
                        );
                    }
                }
            }
            let outcomes = join_all(tasks).await;
            let mut failed = 0usize;
            for err in outcomes.into_iter().filter_map(Result::err) {
                warn!("child move under {} failed: {}", from, err);
                failed += 1;
            }
            if failed > 0 {
                warn!(
                    "{} of the children of {} failed to move; tree may be partially applied",
                    failed, from
                );
            }
            Ok(())
        }
        .boxed_local()
    }
}
