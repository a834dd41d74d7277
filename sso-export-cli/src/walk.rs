//! Lazy, depth-first listing of the files under the cache directory.
//!
//! Directories are opened only when the iterator reaches them, so a caller
//! that stops early never touches the rest of the tree. Listing order is
//! whatever the filesystem returns.

use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Iterator over every non-directory entry below a root directory.
///
/// A missing root yields nothing. Any other listing failure is yielded once
/// as an error, after which the caller is expected to stop.
pub struct CacheFiles {
    root: Option<PathBuf>,
    stack: Vec<(PathBuf, ReadDir)>,
}

impl CacheFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            stack: Vec::new(),
        }
    }

    fn open_dir(&mut self, path: PathBuf) -> Result<()> {
        let entries =
            fs::read_dir(&path).map_err(|e| Error::io_path("listing", &path, e))?;
        self.stack.push((path, entries));
        Ok(())
    }

    /// Handle the root on first use. Returns the root itself when it is a file.
    fn start(&mut self, root: PathBuf) -> Option<Result<PathBuf>> {
        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => self.open_dir(root).err().map(Err),
            Ok(_) => Some(Ok(root)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => Some(Err(Error::io_path("inspecting", &root, e))),
        }
    }
}

impl Iterator for CacheFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if let Some(item) = self.start(root) {
                return Some(item);
            }
        }

        loop {
            let (dir, entries) = self.stack.last_mut()?;
            let entry = match entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => return Some(Err(Error::io_path("listing", dir, e))),
                None => {
                    self.stack.pop();
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => return Some(Err(Error::io_path("inspecting", &path, e))),
            };

            if file_type.is_dir() {
                if let Err(e) = self.open_dir(path) {
                    return Some(Err(e));
                }
                continue;
            }

            return Some(Ok(path));
        }
    }
}

/// Convenience for callers that only have a borrowed path.
pub fn cache_files(root: &Path) -> CacheFiles {
    CacheFiles::new(root)
}
