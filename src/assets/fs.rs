//! Filesystem seam for asset uploads.
//!
//! [`LocalFs`] writes to disk; [`MemoryFs`] keeps files in a map, standing in
//! for object storage in tests and previews.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Operations the asset store needs from its storage.
pub trait FileSystem: Send + Sync {
    /// Create `dir` and its parents. Must succeed if it already exists, even
    /// when another caller creates it concurrently.
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Write `bytes` to a file that must not exist yet.
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] instead of overwriting.
    fn write_new(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        match fs::create_dir_all(dir) {
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
            result => result,
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_new(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        if let Err(err) = file.write_all(bytes).and_then(|()| file.sync_all()) {
            drop(file);
            let _ = fs::remove_file(path);
            return Err(err);
        }
        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a stored file.
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.state.lock().files.get(path).cloned()
    }

    /// Paths of all stored files, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.state.lock().files.keys().cloned().collect()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().dirs.contains(path)
    }
}

impl FileSystem for MemoryFs {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        let mut state = self.state.lock();
        for ancestor in dir.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn write_new(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && !state.dirs.contains(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory `{}` does not exist", parent.display()),
            ));
        }
        if state.files.contains_key(path) {
            return Err(io::ErrorKind::AlreadyExists.into());
        }
        state.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
