//! Loading the bulk source document and persisting output collections.

use crate::config::OutputConfig;
use crate::model::{SourceApplication, SourceDocument};
use crate::{SourceError, SourceResult};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read the whole source document into memory.
///
/// A document without a `results` key yields an empty batch.
pub fn load_applications(path: &Path) -> SourceResult<Vec<SourceApplication>> {
    let file = File::open(path).map_err(|source| SourceError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let document: SourceDocument = serde_json::from_reader(BufReader::new(file)).map_err(
        |source| SourceError::ParseInput {
            path: path.to_path_buf(),
            source,
        },
    )?;

    tracing::info!(
        path = %path.display(),
        applications = document.results.len(),
        "loaded source document"
    );
    Ok(document.results)
}

/// Persist `collection` as the entire content of the configured artifact.
///
/// The output directory is created on demand and any artifact from a
/// previous run is removed before writing. If the new write fails the
/// partial file is removed too, so the path never holds a half-written
/// document.
pub fn write_collection<T: Serialize>(
    config: &OutputConfig,
    collection: &[T],
) -> SourceResult<PathBuf> {
    let dir = config.output_dir();
    fs::create_dir_all(dir).map_err(|source| SourceError::OutputDirCreation {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = config.artifact_path();
    if path.exists() {
        fs::remove_file(&path).map_err(|source| SourceError::StaleArtifactRemoval {
            path: path.clone(),
            source,
        })?;
    }

    if let Err(err) = write_json(&path, collection) {
        if let Err(cleanup) = fs::remove_file(&path) {
            tracing::warn!(
                path = %path.display(),
                error = %cleanup,
                "failed to remove partial artifact"
            );
        }
        return Err(err);
    }

    tracing::info!(
        path = %path.display(),
        records = collection.len(),
        "wrote artifact"
    );
    Ok(path)
}

fn write_json<T: Serialize>(path: &Path, collection: &[T]) -> SourceResult<()> {
    let write_err = |source| SourceError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection).map_err(|source| {
        SourceError::ArtifactSerialization {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(write_err)?;
    writer.get_ref().sync_all().map_err(write_err)?;
    Ok(())
}
