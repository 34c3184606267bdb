use serde::{Deserialize, Serialize};

/// What a bulk extraction does when a single entry fails.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure in the report and move on to the next entry.
    #[default]
    Continue,
    /// Stop at the first failing entry and return its error.
    Abort,
}

/// Extractor settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Per-entry failure handling for `extract_all` and `extract_list`.
    pub on_error: FailurePolicy,

    /// Create the destination directory (and parents) when it is missing.
    /// When false, a missing destination is an error.
    pub create_dest_dir: bool,
}

impl ExtractorConfig {
    #[must_use]
    pub fn with_failure_policy(mut self, on_error: FailurePolicy) -> Self {
        self.on_error = on_error;
        self
    }

    #[must_use]
    pub fn with_create_dest_dir(mut self, create: bool) -> Self {
        self.create_dest_dir = create;
        self
    }
}
