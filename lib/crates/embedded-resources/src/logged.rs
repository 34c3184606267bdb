//! Fire-and-forget wrappers for hosts that must never see an error.
//!
//! Each function runs the matching [`Extractor`] operation, logs any failure
//! through `tracing::error!` with the full cause chain, and swallows it.
//! Nothing here panics or returns an error.

use std::error::Error;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::bundle::ResourceBundle;
use crate::error::ResourceError;
use crate::extract::{ExtractReport, Extractor};

/// [`Extractor::extract_one`], logging the error instead of returning it.
pub fn extract_one<B: ResourceBundle + ?Sized>(
    extractor: &Extractor<'_, B>,
    prefix: &str,
    file_name: &str,
    dest: &Path,
) {
    if let Err(err) = extractor.extract_one(prefix, file_name, dest) {
        log_failure("extract resource to file", &err);
    }
}

/// [`Extractor::extract_all`]. Enumeration failures and every entry in
/// [`ExtractReport::failed`] are logged.
pub fn extract_all<B: ResourceBundle + ?Sized>(
    extractor: &Extractor<'_, B>,
    prefix: &str,
    dest: &Path,
) {
    match extractor.extract_all(prefix, dest) {
        Ok(report) => log_report("extract resource namespace", &report),
        Err(err) => log_failure("extract resource namespace", &err),
    }
}

/// [`Extractor::extract_list`]. Under [`FailurePolicy::Abort`] only the
/// entry that stopped the run is logged.
///
/// [`FailurePolicy::Abort`]: crate::FailurePolicy::Abort
pub fn extract_list<B: ResourceBundle + ?Sized, S: AsRef<str>>(
    extractor: &Extractor<'_, B>,
    prefix: &str,
    file_names: &[S],
    dest: &Path,
) {
    match extractor.extract_list(prefix, file_names, dest) {
        Ok(report) => log_report("extract resource list", &report),
        Err(err) => log_failure("extract resource list", &err),
    }
}

/// [`crate::load_json`], returning `None` on any failure.
pub fn load_json<T, B>(bundle: &B, name: &str) -> Option<T>
where
    T: DeserializeOwned,
    B: ResourceBundle + ?Sized,
{
    crate::json::load_json(bundle, name)
        .map_err(|err| log_failure("load resource as object", &err))
        .ok()
}

fn log_report(operation: &str, report: &ExtractReport) {
    for failure in &report.failed {
        log_failure(operation, &failure.error);
    }
}

fn log_failure(operation: &str, err: &ResourceError) {
    tracing::error!(
        operation,
        kind = ?err.kind(),
        error = %error_chain(err),
        "failed to {operation}"
    );
}

/// `outer: inner: root` rendering of an error and its sources.
fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
