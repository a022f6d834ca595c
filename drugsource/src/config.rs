//! Output configuration resolved once at startup and handed to the writer.

use crate::{SourceError, SourceResult};
use std::path::{Path, PathBuf};

/// Directory artifacts are written to unless overridden.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Where a pipeline persists its collection.
#[derive(Clone, Debug)]
pub struct OutputConfig {
    output_dir: PathBuf,
    file_name: String,
}

impl OutputConfig {
    /// Create a new `OutputConfig`.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Directory the artifact is written to; created on demand
    /// * `file_name` - Bare file name of the artifact; surrounding whitespace is
    ///   trimmed
    ///
    /// # Returns
    ///
    /// `SourceError::InvalidConfig` when the name is empty, is `.` or `..`, or
    /// contains a path separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use drugsource::OutputConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = OutputConfig::new(PathBuf::from("dist"), "drugs.json").unwrap();
    /// assert_eq!(config.artifact_path(), PathBuf::from("dist").join("drugs.json"));
    /// ```
    pub fn new(output_dir: PathBuf, file_name: impl Into<String>) -> SourceResult<Self> {
        let file_name = file_name.into();
        let trimmed = file_name.trim();

        if trimmed.is_empty() {
            return Err(SourceError::InvalidConfig(
                "output file name cannot be empty".into(),
            ));
        }
        if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
            return Err(SourceError::InvalidConfig(format!(
                "output file name must be a plain file name, got {file_name:?}"
            )));
        }

        Ok(Self {
            output_dir,
            file_name: trimmed.to_string(),
        })
    }

    /// Directory the artifact lives in.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validated, trimmed artifact file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the artifact: `output_dir` joined with `file_name`.
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}
