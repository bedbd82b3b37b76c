//! Read/write access to project artifacts.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Storage backing the artifacts a scaffold reads and writes
pub trait ArtifactStore {
    /// Whether an artifact exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Read the full text of an artifact
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replace (or create) an artifact with `contents`
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Artifacts on the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl ArtifactStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)
    }
}

/// Reads through to another store but only records writes
#[derive(Debug, Default)]
pub struct DryRunStore<S> {
    inner: S,
    announced: Vec<PathBuf>,
}

impl<S: ArtifactStore> DryRunStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            announced: Vec::new(),
        }
    }

    /// Paths that would have been written, in order
    pub fn announced(&self) -> &[PathBuf] {
        &self.announced
    }
}

impl<S: ArtifactStore> ArtifactStore for DryRunStore<S> {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        self.inner.read(path)
    }

    fn write(&mut self, path: &Path, _contents: &str) -> io::Result<()> {
        tracing::warn!("[dry-run] skipping write of {:?}", path);
        self.announced.push(path.to_path_buf());
        Ok(())
    }
}

/// In-memory artifacts, for previews and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: HashMap<PathBuf, String>,
    read_only: HashSet<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Make writes to `path` fail with `PermissionDenied`
    pub fn set_read_only(&mut self, path: impl Into<PathBuf>) {
        self.read_only.insert(path.into());
    }

    /// Current contents of a file
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }
}

impl ArtifactStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if self.read_only.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
