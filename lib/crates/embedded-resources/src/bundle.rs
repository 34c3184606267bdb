//! The resource bundle port and an in-memory byte table implementation.
//!
//! A bundle exposes namespaced resource names (`App.Assets.index.html`) and
//! read-only byte streams for them. Extraction and JSON loading are written
//! against [`ResourceBundle`] only, so any embedding mechanism can sit
//! behind it.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::{Cursor, Read};

use crate::error::{ResourceError, Result};

/// Separator between namespace segments in a resource name.
pub const DEFAULT_SEPARATOR: char = '.';

// ── Port ──────────────────────────────────────────────────────────────────────

/// Read-only access to a set of named, embedded byte blobs.
pub trait ResourceBundle {
    /// Character joining namespace segments of a resource name.
    fn separator(&self) -> char {
        DEFAULT_SEPARATOR
    }

    /// Every resource name in the bundle, in enumeration order.
    fn names(&self) -> Result<Vec<String>>;

    /// Open a byte stream for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the bundle has no such resource.
    fn open(&self, name: &str) -> Result<Box<dyn Read + '_>>;

    /// Read the full contents of `name` into memory.
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let mut reader = self.open(name)?;
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|source| ResourceError::Read {
                name: name.to_string(),
                source,
            })?;
        Ok(buf)
    }
}

// ── Naming helpers ────────────────────────────────────────────────────────────

/// Build a logical resource name from a namespace and path segments.
///
/// An empty namespace contributes nothing, so `("", ["a.txt"])` is `a.txt`.
pub(crate) fn join_name<'a, I>(namespace: &str, segments: I, separator: char) -> String
where
    I: IntoIterator<Item = Cow<'a, str>>,
{
    let mut name = namespace.to_string();
    for segment in segments {
        if !name.is_empty() {
            name.push(separator);
        }
        name.push_str(&segment);
    }
    name
}

/// Keep the first entry for each name, warning about the ones dropped.
///
/// Distinct paths can flatten to the same name (`a.b/c.txt` and `a/b.c.txt`
/// both become `a.b.c.txt`), and each name must map to exactly one resource.
pub(crate) fn dedup_names<T>(entries: Vec<(String, T)>) -> Vec<(String, T)> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|(name, _)| {
            let first = seen.insert(name.clone());
            if !first {
                tracing::warn!(resource = %name, "duplicate resource name, keeping the first");
            }
            first
        })
        .collect()
}

/// A prefix written with its trailing separator (`App.Assets.`) means the
/// same namespace as without it.
fn trim_prefix(prefix: &str, separator: char) -> &str {
    prefix.strip_suffix(separator).unwrap_or(prefix)
}

/// `prefix + separator + file_name`, or just `file_name` for an empty prefix.
pub(crate) fn resource_name(prefix: &str, file_name: &str, separator: char) -> String {
    let prefix = trim_prefix(prefix, separator);
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}{separator}{file_name}")
    }
}

/// Strip `prefix` and its separator from `name`.
///
/// Returns `None` when `name` is outside the namespace. `App.AssetsX.a` is
/// not inside `App.Assets`.
pub(crate) fn strip_namespace<'n>(name: &'n str, prefix: &str, separator: char) -> Option<&'n str> {
    let prefix = trim_prefix(prefix, separator);
    if prefix.is_empty() {
        return Some(name);
    }
    name.strip_prefix(prefix)?.strip_prefix(separator)
}

// ── In-memory bundle ──────────────────────────────────────────────────────────

/// An ordered table of compiled-in resources.
///
/// ```
/// use embedded_resources::{MemoryBundle, ResourceBundle};
///
/// let bundle = MemoryBundle::new()
///     .with("App.Assets.a.txt", b"alpha".as_slice())
///     .with("App.Assets.b.txt", b"beta".as_slice());
/// assert_eq!(bundle.read("App.Assets.b.txt").unwrap(), b"beta");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBundle {
    separator: char,
    entries: Vec<(String, Cow<'static, [u8]>)>,
}

impl Default for MemoryBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBundle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Builder form of [`MemoryBundle::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Add a resource, replacing the bytes of an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) {
        let name = name.into();
        let bytes = bytes.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = bytes,
            None => self.entries.push((name, bytes)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, B> FromIterator<(N, B)> for MemoryBundle
where
    N: Into<String>,
    B: Into<Cow<'static, [u8]>>,
{
    fn from_iter<I: IntoIterator<Item = (N, B)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (name, bytes) in iter {
            bundle.insert(name, bytes);
        }
        bundle
    }
}

impl ResourceBundle for MemoryBundle {
    fn separator(&self) -> char {
        self.separator
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|(n, _)| n.clone()).collect())
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| Box::new(Cursor::new(&bytes[..])) as Box<dyn Read + '_>)
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn bundle() -> MemoryBundle {
        MemoryBundle::new()
            .with("App.Assets.a.txt", b"alpha".as_slice())
            .with("App.Assets.b.txt", b"beta".as_slice())
            .with("App.Other.c.txt", b"gamma".as_slice())
    }

    #[test]
    fn test_names_preserve_insertion_order() {
        let names = bundle().names().expect("names");
        assert_eq!(
            names,
            ["App.Assets.a.txt", "App.Assets.b.txt", "App.Other.c.txt"]
        );
    }

    #[test]
    fn test_insert_replaces_existing_entry_in_place() {
        let mut b = bundle();
        b.insert("App.Assets.a.txt", b"ALPHA".to_vec());
        assert_eq!(b.len(), 3);
        assert_eq!(b.read("App.Assets.a.txt").expect("read"), b"ALPHA");
        assert_eq!(b.names().expect("names")[0], "App.Assets.a.txt");
    }

    #[test]
    fn test_open_unknown_name_is_not_found() {
        let err = bundle().open("App.Assets.zzz").err().expect("must fail");
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn test_from_iterator_collects_pairs() {
        let b: MemoryBundle = [("x", b"1".as_slice()), ("y", b"2".as_slice())]
            .into_iter()
            .collect();
        assert_eq!(b.names().expect("names"), ["x", "y"]);
        assert!(!b.is_empty());
    }

    #[test]
    fn test_join_name_skips_empty_namespace() {
        let segs = || ["Assets", "a.txt"].map(Cow::Borrowed);
        assert_eq!(join_name("App", segs(), '.'), "App.Assets.a.txt");
        assert_eq!(join_name("", segs(), '/'), "Assets/a.txt");
    }

    #[test]
    fn test_resource_name_with_and_without_prefix() {
        assert_eq!(resource_name("App.Assets", "a.txt", '.'), "App.Assets.a.txt");
        assert_eq!(resource_name("", "a.txt", '.'), "a.txt");
    }

    #[test]
    fn test_strip_namespace_requires_separator_boundary() {
        assert_eq!(
            strip_namespace("App.Assets.a.txt", "App.Assets", '.'),
            Some("a.txt")
        );
        assert_eq!(strip_namespace("App.AssetsX.a.txt", "App.Assets", '.'), None);
        assert_eq!(strip_namespace("Other.a.txt", "App.Assets", '.'), None);
        assert_eq!(strip_namespace("App", "App.Assets", '.'), None);
        assert_eq!(strip_namespace("a.txt", "", '.'), Some("a.txt"));
    }

    #[test]
    fn test_trailing_separator_on_prefix_is_ignored() {
        assert_eq!(resource_name("App.Assets.", "a.txt", '.'), "App.Assets.a.txt");
        assert_eq!(
            strip_namespace("App.Assets.a.txt", "App.Assets.", '.'),
            Some("a.txt")
        );
        assert_eq!(resource_name(".", "a.txt", '.'), "a.txt");
    }

    #[test]
    fn test_dedup_names_keeps_first_occurrence() {
        let entries = vec![
            ("App.a.b.c.txt".to_string(), 1),
            ("App.x.txt".to_string(), 2),
            ("App.a.b.c.txt".to_string(), 3),
        ];
        assert_eq!(
            dedup_names(entries),
            [("App.a.b.c.txt".to_string(), 1), ("App.x.txt".to_string(), 2)]
        );
    }
}
