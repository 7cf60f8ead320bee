//! Filesystem probing used by validation and checkpoint discovery.
//!
//! [`FsProbe`] reads the real filesystem. [`MemoryProbe`] holds an in-memory
//! tree for tests and dry runs.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of a filesystem.
pub trait PathProbe {
    /// Reports whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Reports whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names directly under `dir`.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// Probe backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    File,
    Dir,
}

/// An in-memory directory tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    entries: BTreeMap<PathBuf, Entry>,
}

impl MemoryProbe {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory and all of its ancestors.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.entries.insert(ancestor.to_path_buf(), Entry::Dir);
        }
        self
    }

    /// Adds a file and all of its ancestor directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.entries.insert(path.to_path_buf(), Entry::File);
        self
    }
}

impl PathProbe for MemoryProbe {
    fn exists(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.entries.get(path) == Some(&Entry::Dir)
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        if !self.is_dir(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", dir.display()),
            ));
        }
        Ok(self
            .entries
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}
