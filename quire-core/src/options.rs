//! Document configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options controlling how a [`Document`](crate::Document) is generated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Directory under which per-run staging directories are created.
    /// Defaults to the system temp directory.
    pub staging_root: Option<PathBuf>,
}

impl DocumentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the staging root
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }
}
