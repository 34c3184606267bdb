//! Copy resources out of a bundle into a flat destination directory.
//!
//! Each resource becomes exactly one file whose name is the resource name
//! with the namespace prefix stripped. Files are created or truncated, never
//! appended. The resource is opened before the destination file is created,
//! so a missing resource never leaves an empty file behind; a copy that fails
//! part-way removes what it wrote.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use crate::bundle::{ResourceBundle, resource_name, strip_namespace};
use crate::config::{ExtractorConfig, FailurePolicy};
use crate::error::{ResourceError, Result};

const COPY_BUF_SIZE: usize = 64 * 1024;

// ── Results ───────────────────────────────────────────────────────────────────

/// A resource written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Full resource name in the bundle.
    pub name: String,
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: u64,
}

/// A resource that could not be extracted during a bulk operation.
#[derive(Debug)]
pub struct ExtractFailure {
    pub name: String,
    pub error: ResourceError,
}

/// Outcome of `extract_all` / `extract_list`.
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Written files, in the order they were extracted.
    pub written: Vec<ExtractedFile>,
    /// Entries skipped under [`FailurePolicy::Continue`].
    pub failed: Vec<ExtractFailure>,
}

impl ExtractReport {
    /// True when no entry failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// ── Extractor ─────────────────────────────────────────────────────────────────

/// Extracts resources from a borrowed bundle.
///
/// ```
/// use embedded_resources::{Extractor, MemoryBundle};
///
/// let bundle = MemoryBundle::new().with("App.Assets.a.txt", b"alpha".as_slice());
/// let dest = tempfile::tempdir().unwrap();
/// let file = Extractor::new(&bundle)
///     .extract_one("App.Assets", "a.txt", dest.path())
///     .unwrap();
/// assert_eq!(std::fs::read(file.path).unwrap(), b"alpha");
/// ```
pub struct Extractor<'b, B: ResourceBundle + ?Sized> {
    bundle: &'b B,
    config: ExtractorConfig,
}

impl<'b, B: ResourceBundle + ?Sized> Extractor<'b, B> {
    /// Extractor with the default configuration.
    #[must_use]
    pub fn new(bundle: &'b B) -> Self {
        Self::with_config(bundle, ExtractorConfig::default())
    }

    #[must_use]
    pub fn with_config(bundle: &'b B, config: ExtractorConfig) -> Self {
        Self { bundle, config }
    }

    #[must_use]
    pub fn bundle(&self) -> &'b B {
        self.bundle
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Copy `prefix + separator + file_name` to `dest/file_name`.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidFileName`] if `file_name` is not a single path component.
    /// - [`ResourceError::Destination`] if `dest` is missing or not a directory.
    /// - [`ResourceError::NotFound`] if the bundle has no such resource.
    /// - [`ResourceError::Read`] / [`ResourceError::Write`] if the copy fails.
    pub fn extract_one(&self, prefix: &str, file_name: &str, dest: &Path) -> Result<ExtractedFile> {
        self.prepare_dest(dest)?;
        let name = resource_name(prefix, file_name, self.bundle.separator());
        self.copy(&name, file_name, dest)
    }

    /// Copy every resource inside the `prefix` namespace into `dest`.
    ///
    /// Resources outside the namespace are skipped. An empty prefix selects
    /// every resource. A trailing separator on `prefix` is ignored.
    ///
    /// # Errors
    ///
    /// Fails if the destination is unusable or enumeration fails. Per-entry
    /// failures follow the configured [`FailurePolicy`].
    pub fn extract_all(&self, prefix: &str, dest: &Path) -> Result<ExtractReport> {
        self.prepare_dest(dest)?;
        let separator = self.bundle.separator();
        let names = self.bundle.names()?;

        let mut report = ExtractReport::default();
        for name in names {
            let Some(file_name) = strip_namespace(&name, prefix, separator) else {
                continue;
            };
            let result = self.copy(&name, file_name, dest);
            self.record(&mut report, name, result)?;
        }

        tracing::info!(
            prefix,
            dest = %dest.display(),
            written = report.written.len(),
            failed = report.failed.len(),
            "extracted resource namespace"
        );
        Ok(report)
    }

    /// Copy the listed files from the `prefix` namespace, in list order.
    ///
    /// # Errors
    ///
    /// Fails if the destination is unusable. Per-entry failures follow the
    /// configured [`FailurePolicy`].
    pub fn extract_list<S: AsRef<str>>(
        &self,
        prefix: &str,
        file_names: &[S],
        dest: &Path,
    ) -> Result<ExtractReport> {
        self.prepare_dest(dest)?;
        let separator = self.bundle.separator();

        let mut report = ExtractReport::default();
        for file_name in file_names {
            let file_name = file_name.as_ref();
            let name = resource_name(prefix, file_name, separator);
            let result = self.copy(&name, file_name, dest);
            self.record(&mut report, name, result)?;
        }

        tracing::info!(
            prefix,
            dest = %dest.display(),
            requested = file_names.len(),
            written = report.written.len(),
            failed = report.failed.len(),
            "extracted resource list"
        );
        Ok(report)
    }

    fn prepare_dest(&self, dest: &Path) -> Result<()> {
        let unusable = |source: io::Error| ResourceError::Destination {
            path: dest.to_path_buf(),
            source,
        };
        if self.config.create_dest_dir {
            fs::create_dir_all(dest).map_err(unusable)?;
        }
        let meta = fs::metadata(dest).map_err(unusable)?;
        if !meta.is_dir() {
            return Err(unusable(io::Error::new(
                io::ErrorKind::NotADirectory,
                "destination is not a directory",
            )));
        }
        Ok(())
    }

    fn record(
        &self,
        report: &mut ExtractReport,
        name: String,
        result: Result<ExtractedFile>,
    ) -> Result<()> {
        match result {
            Ok(file) => report.written.push(file),
            Err(error) => match self.config.on_error {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Continue => {
                    tracing::warn!(resource = %name, error = %error, "skipping resource");
                    report.failed.push(ExtractFailure { name, error });
                }
            },
        }
        Ok(())
    }

    fn copy(&self, name: &str, file_name: &str, dest: &Path) -> Result<ExtractedFile> {
        validate_file_name(file_name)?;
        let mut reader = self.bundle.open(name)?;

        let path = dest.join(file_name);
        let mut file = File::create(&path).map_err(|source| ResourceError::Write {
            path: path.clone(),
            source,
        })?;

        match copy_stream(name, &mut reader, &mut file, &path) {
            Ok(bytes) => {
                tracing::debug!(resource = name, path = %path.display(), bytes, "wrote resource");
                Ok(ExtractedFile {
                    name: name.to_string(),
                    path,
                    bytes,
                })
            }
            Err(e) => {
                drop(file);
                discard_partial(&path);
                Err(e)
            }
        }
    }
}

/// Copy in fixed-size chunks so read and write failures stay distinguishable.
fn copy_stream(
    name: &str,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    path: &Path,
) -> Result<u64> {
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(ResourceError::Read {
                    name: name.to_string(),
                    source,
                });
            }
        };
        writer
            .write_all(&buf[..n])
            .map_err(|source| ResourceError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        total += n as u64;
    }
    writer.flush().map_err(|source| ResourceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(total)
}

fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "could not remove partial file");
    }
}

/// A relative file name must be one normal path component.
fn validate_file_name(file_name: &str) -> Result<()> {
    let mut components = Path::new(file_name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single && !file_name.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(ResourceError::InvalidFileName {
            name: file_name.to_string(),
        })
    }
}
