//! Errors raised while loading source documents or persisting artifacts.

use std::path::PathBuf;

/// Failure of one I/O step in a pipeline run.
///
/// Every variant except `InvalidConfig` carries the path it was working on
/// and the underlying cause as its `source`.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Output settings rejected by [`OutputConfig::new`](crate::OutputConfig::new)
    #[error("invalid output configuration: {0}")]
    InvalidConfig(String),
    /// The source document could not be opened
    #[error("failed to read source document {path}: {source}", path = path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The source document is not valid JSON or has the wrong shape
    #[error("failed to parse source document {path}: {source}", path = path.display())]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The output directory could not be created
    #[error("failed to create output directory {path}: {source}", path = path.display())]
    OutputDirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An artifact from a previous run could not be removed
    #[error("failed to remove stale artifact {path}: {source}", path = path.display())]
    StaleArtifactRemoval {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Creating, flushing or syncing the new artifact failed
    #[error("failed to write artifact {path}: {source}", path = path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The collection could not be encoded as JSON
    #[error("failed to serialize artifact {path}: {source}", path = path.display())]
    ArtifactSerialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias used across the `drugsource` API.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
