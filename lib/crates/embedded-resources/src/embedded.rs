//! Resources compiled into the binary with `include_dir!`.
//!
//! Every file under the embedded directory gets a logical name made of the
//! bundle namespace followed by its path segments, all joined with the
//! separator:
//!
//! ```text
//! include_dir!("$CARGO_MANIFEST_DIR/web")  namespace "App"
//!   web/Html/index.html      ->  App.Html.index.html
//!   web/Html/css/site.css    ->  App.Html.css.site.css
//! ```

use std::borrow::Cow;
use std::io::Read;
use std::path::{Component, Path};

use include_dir::{Dir, DirEntry, File};

use crate::bundle::{DEFAULT_SEPARATOR, ResourceBundle, dedup_names, join_name};
use crate::error::{ResourceError, Result};

/// A [`ResourceBundle`] over a directory tree embedded at compile time.
///
/// ```ignore
/// use include_dir::{Dir, include_dir};
/// use embedded_resources::EmbeddedBundle;
///
/// static WEB: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/web");
///
/// let bundle = EmbeddedBundle::new("App", &WEB);
/// ```
#[derive(Debug, Clone)]
pub struct EmbeddedBundle {
    separator: char,
    entries: Vec<(String, &'static File<'static>)>,
}

impl EmbeddedBundle {
    /// Index every file in `dir` under `namespace`, using `.` as separator.
    ///
    /// When two paths flatten to the same name only the first is kept.
    #[must_use]
    pub fn new(namespace: &str, dir: &'static Dir<'static>) -> Self {
        Self::with_separator(namespace, dir, DEFAULT_SEPARATOR)
    }

    #[must_use]
    pub fn with_separator(namespace: &str, dir: &'static Dir<'static>, separator: char) -> Self {
        let mut files = Vec::new();
        collect_files(dir, &mut files);
        let entries = files
            .into_iter()
            .map(|file| (join_name(namespace, path_segments(file.path()), separator), file))
            .collect();
        Self {
            separator,
            entries: dedup_names(entries),
        }
    }

    /// Raw bytes of a single resource without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no resource has that name.
    pub fn get(&self, name: &str) -> Result<&'static [u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, file)| file.contents())
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }
}

impl ResourceBundle for EmbeddedBundle {
    fn separator(&self) -> char {
        self.separator
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|(n, _)| n.clone()).collect())
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.get(name)?))
    }
}

fn collect_files(dir: &'static Dir<'static>, out: &mut Vec<&'static File<'static>>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_files(sub, out),
            DirEntry::File(file) => out.push(file),
        }
    }
}

/// Normal components of a relative path as strings.
pub(crate) fn path_segments(path: &Path) -> impl Iterator<Item = Cow<'_, str>> {
    path.components().filter_map(|c| match c {
        Component::Normal(s) => Some(s.to_string_lossy()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use include_dir::include_dir;

    use super::*;
    use crate::error::ErrorKind;

    static FIXTURES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures/app");
    static COLLIDING: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures/collide");

    fn bundle() -> EmbeddedBundle {
        EmbeddedBundle::new("App", &FIXTURES)
    }

    #[test]
    fn test_names_are_namespaced_by_path() {
        let mut names = bundle().names().expect("names");
        names.sort();
        assert_eq!(
            names,
            [
                "App.Assets.a.txt",
                "App.Assets.b.txt",
                "App.Config.config.json",
                "App.Html.css.site.css",
                "App.Html.index.html",
                "App.Html.logo.bin",
            ]
        );
    }

    #[test]
    fn test_get_returns_embedded_bytes() {
        let bytes = bundle().get("App.Assets.a.txt").expect("a.txt");
        assert_eq!(bytes, b"alpha\n");
    }

    #[test]
    fn test_open_reads_same_bytes_as_get() {
        let b = bundle();
        let via_read = b.read("App.Html.logo.bin").expect("read");
        let via_get = b.get("App.Html.logo.bin").expect("get");
        assert_eq!(via_read, via_get);
    }

    #[test]
    fn test_get_errors_for_unknown_resource() {
        let err = bundle().get("App.Assets.nope.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn test_custom_separator_and_empty_namespace() {
        let b = EmbeddedBundle::with_separator("", &FIXTURES, '/');
        assert_eq!(b.separator(), '/');
        let names = b.names().expect("names");
        assert!(names.iter().any(|n| n == "Assets/a.txt"), "{names:?}");
    }

    #[test]
    fn test_colliding_paths_yield_one_name() {
        let b = EmbeddedBundle::new("App", &COLLIDING);
        let names = b.names().expect("names");
        assert_eq!(names, ["App.a.b.c.txt"]);
        let bytes = b.get("App.a.b.c.txt").expect("get");
        assert!(bytes == b"FIRST" || bytes == b"SECOND", "{bytes:?}");
    }
}
