//! In-memory reference backend
//!
//! Stores the whole tree as nested nodes behind `Arc<Mutex<..>>`, so cloned
//! handles observe the same tree. Useful as a test double and for embedding
//! the store where no platform filesystem is available.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, StoreError};
use crate::traits::{DirectoryHandle, EntryKind, FileHandle, StorageBackend, WriteStream};

/// One node of the in-memory tree
#[derive(Debug)]
enum Node {
    File(Vec<u8>),
    Directory(BTreeMap<String, Arc<Mutex<Node>>>),
}

impl Node {
    fn empty_directory() -> Arc<Mutex<Node>> {
        Arc::new(Mutex::new(Node::Directory(BTreeMap::new())))
    }

    fn empty_file() -> Arc<Mutex<Node>> {
        Arc::new(Mutex::new(Node::File(Vec::new())))
    }
}

fn lock(node: &Arc<Mutex<Node>>) -> Result<MutexGuard<'_, Node>> {
    node.lock()
        .map_err(|_| StoreError::Backend("memory tree lock poisoned".to_owned()))
}

/// An in-memory storage backend
///
/// Cloning the backend shares the underlying tree.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    root: Arc<Mutex<Node>>,
}

impl MemoryBackend {
    /// Create an empty in-memory tree
    #[must_use]
    pub fn new() -> Self {
        MemoryBackend {
            root: Node::empty_directory(),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        MemoryBackend::new()
    }
}

impl StorageBackend for MemoryBackend {
    type Directory = MemoryDirectory;
    type File = MemoryFile;

    async fn open_root(&self) -> Result<Self::Directory> {
        Ok(MemoryDirectory {
            node: Arc::clone(&self.root),
        })
    }
}

/// Directory handle into a [`MemoryBackend`] tree
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    node: Arc<Mutex<Node>>,
}

impl MemoryDirectory {
    fn children<'a>(
        guard: &'a mut MutexGuard<'_, Node>,
    ) -> Result<&'a mut BTreeMap<String, Arc<Mutex<Node>>>> {
        match &mut **guard {
            Node::Directory(children) => Ok(children),
            Node::File(_) => Err(StoreError::Backend(
                "handle does not refer to a directory".to_owned(),
            )),
        }
    }
}

impl DirectoryHandle for MemoryDirectory {
    type File = MemoryFile;

    async fn open_directory(&self, name: &str, create: bool) -> Result<Self> {
        let mut guard = lock(&self.node)?;
        let children = Self::children(&mut guard)?;
        let node = match children.get(name) {
            Some(child) => {
                let is_dir = matches!(*lock(child)?, Node::Directory(_));
                if !is_dir {
                    return Err(StoreError::Backend(format!("'{name}' is a file")));
                }
                Arc::clone(child)
            }
            None if create => {
                let child = Node::empty_directory();
                children.insert(name.to_owned(), Arc::clone(&child));
                child
            }
            None => {
                return Err(StoreError::NotFound {
                    path: name.to_owned(),
                })
            }
        };
        Ok(MemoryDirectory { node })
    }

    async fn open_file(&self, name: &str, create: bool) -> Result<Self::File> {
        let mut guard = lock(&self.node)?;
        let children = Self::children(&mut guard)?;
        let node = match children.get(name) {
            Some(child) => {
                let is_file = matches!(*lock(child)?, Node::File(_));
                if !is_file {
                    return Err(StoreError::Backend(format!("'{name}' is a directory")));
                }
                Arc::clone(child)
            }
            None if create => {
                let child = Node::empty_file();
                children.insert(name.to_owned(), Arc::clone(&child));
                child
            }
            None => {
                return Err(StoreError::NotFound {
                    path: name.to_owned(),
                })
            }
        };
        Ok(MemoryFile { node })
    }

    async fn entries(&self) -> Result<Vec<(String, EntryKind)>> {
        let mut guard = lock(&self.node)?;
        let children = Self::children(&mut guard)?;
        let mut out = Vec::with_capacity(children.len());
        for (name, child) in children.iter() {
            let kind = match *lock(child)? {
                Node::File(_) => EntryKind::File,
                Node::Directory(_) => EntryKind::Directory,
            };
            out.push((name.clone(), kind));
        }
        Ok(out)
    }

    async fn remove_entry(&self, name: &str, recursive: bool) -> Result<()> {
        let mut guard = lock(&self.node)?;
        let children = Self::children(&mut guard)?;
        let Some(child) = children.get(name) else {
            return Err(StoreError::NotFound {
                path: name.to_owned(),
            });
        };
        if !recursive {
            if let Node::Directory(grandchildren) = &*lock(child)? {
                if !grandchildren.is_empty() {
                    return Err(StoreError::Backend(format!(
                        "directory '{name}' is not empty"
                    )));
                }
            }
        }
        children.remove(name);
        Ok(())
    }
}

/// File handle into a [`MemoryBackend`] tree
#[derive(Debug, Clone)]
pub struct MemoryFile {
    node: Arc<Mutex<Node>>,
}

impl FileHandle for MemoryFile {
    type Writer = MemoryWriter;

    async fn open_writable(&self, keep_existing_data: bool) -> Result<Self::Writer> {
        let buf = if keep_existing_data {
            match &*lock(&self.node)? {
                Node::File(data) => data.clone(),
                Node::Directory(_) => {
                    return Err(StoreError::Backend(
                        "handle does not refer to a file".to_owned(),
                    ))
                }
            }
        } else {
            Vec::new()
        };
        Ok(MemoryWriter {
            node: Arc::clone(&self.node),
            buf,
        })
    }

    async fn read_all(&self) -> Result<Vec<u8>> {
        match &*lock(&self.node)? {
            Node::File(data) => Ok(data.clone()),
            Node::Directory(_) => Err(StoreError::Backend(
                "handle does not refer to a file".to_owned(),
            )),
        }
    }
}

/// Write stream over a [`MemoryFile`]
///
/// Buffers writes locally; the file node is only updated on
/// [`close`](WriteStream::close), matching the single-entry atomicity the
/// store assumes of its backend.
#[derive(Debug)]
pub struct MemoryWriter {
    node: Arc<Mutex<Node>>,
    buf: Vec<u8>,
}

impl WriteStream for MemoryWriter {
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(data);
        Ok(())
    }

    async fn close(self) -> Result<()> {
        match &mut *lock(&self.node)? {
            Node::File(data) => {
                *data = self.buf;
                Ok(())
            }
            Node::Directory(_) => Err(StoreError::Backend(
                "handle does not refer to a file".to_owned(),
            )),
        }
    }
}
