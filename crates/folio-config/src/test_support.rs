//! Fixtures for folio-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A scratch directory tree that is removed on drop.
pub struct TestDir {
    /// Backing directory.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory (and its parents) relative to the root.
    pub fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `content` to a file relative to the root.
    pub fn write(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a one-page bundle.
    pub fn create_bundle(&self, rel_path: &str) -> PathBuf {
        self.write(rel_path, "<!-- id:\"home\" -->\n")
    }

    /// Writes a `.folio.toml` into `rel_dir` (empty for the root).
    pub fn create_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        self.write(&Path::new(rel_dir).join(CONFIG_FILENAME).to_string_lossy(), content)
    }
}
