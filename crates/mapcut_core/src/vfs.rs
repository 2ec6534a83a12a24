use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Layered virtual filesystem: a vanilla base root plus mod overlay roots.
/// A later-registered root overrides earlier ones for the same relative
/// path.
#[derive(Debug, Clone)]
pub struct Vfs {
    roots: Vec<PathBuf>,
}

impl Vfs {
    pub fn new(base_root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![base_root.into()],
        }
    }

    pub fn push_mod_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// Physical path for `relative`, searching the newest layer first.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let relative = relative.as_ref();
        self.roots
            .iter()
            .rev()
            .map(|root| root.join(relative))
            .find(|p| p.is_file())
    }

    /// Resolve and read a file that must exist somewhere in the layers.
    pub fn read(&self, relative: impl AsRef<Path>) -> Result<(PathBuf, String), Error> {
        let relative = relative.as_ref();
        let path = self
            .resolve(relative)
            .ok_or_else(|| Error::FileNotFound(relative.to_path_buf()))?;
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Ok((path, text))
    }
}
