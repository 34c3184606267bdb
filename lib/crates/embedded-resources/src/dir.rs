//! Runtime resource loader over a directory on disk.
//!
//! Names follow the same scheme as [`crate::EmbeddedBundle`], so a tree can
//! be served from disk during development and embedded for release builds
//! without changing the names callers extract.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use walkdir::WalkDir;

use crate::bundle::{DEFAULT_SEPARATOR, ResourceBundle, dedup_names, join_name};
use crate::embedded::path_segments;
use crate::error::{ResourceError, Result};

/// A [`ResourceBundle`] over the files under `root`.
///
/// [`ResourceBundle::names`] walks the tree and remembers where each name
/// lives, so opening the names it returned does not walk again. A name that
/// is not in the remembered index triggers one fresh walk.
#[derive(Debug)]
pub struct DirBundle {
    root: PathBuf,
    namespace: String,
    separator: char,
    paths: Mutex<HashMap<String, PathBuf>>,
}

impl Clone for DirBundle {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            namespace: self.namespace.clone(),
            separator: self.separator,
            paths: Mutex::default(),
        }
    }
}

impl DirBundle {
    #[must_use]
    pub fn new(namespace: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
            separator: DEFAULT_SEPARATOR,
            paths: Mutex::default(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self.paths = Mutex::default();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree, replace the remembered index and return it in path order.
    ///
    /// When two paths flatten to the same name only the first (in sorted path
    /// order) is kept.
    fn reindex(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| ResourceError::Enumerate {
                source: io::Error::from(e),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            let name = join_name(&self.namespace, path_segments(relative), self.separator);
            out.push((name, entry.into_path()));
        }
        let out = dedup_names(out);

        let mut paths = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        paths.clear();
        paths.extend(out.iter().cloned());
        Ok(out)
    }

    fn lookup(&self, name: &str) -> Option<PathBuf> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if let Some(path) = self.lookup(name) {
            return Ok(path);
        }
        self.reindex()?
            .into_iter()
            .find_map(|(n, path)| (n == name).then_some(path))
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }
}

impl ResourceBundle for DirBundle {
    fn separator(&self) -> char {
        self.separator
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.reindex()?.into_iter().map(|(name, _)| name).collect())
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let path = self.resolve(name)?;
        let file = std::fs::File::open(&path).map_err(|source| ResourceError::Read {
            name: name.to_string(),
            source,
        })?;
        Ok(Box::new(file))
    }
}
