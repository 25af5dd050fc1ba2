//! Dataset file I/O.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};

/// Read and validate a dataset file.
///
/// Nothing is written on any error.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| DatasetError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let dataset = Dataset::from_value(value)?;
    tracing::info!("Loaded {} records from {:?}", dataset.countries().len(), path);
    Ok(dataset)
}

/// Serialize a dataset as pretty JSON with a trailing newline.
pub fn render_dataset(dataset: &Dataset) -> Result<String> {
    let mut content = serde_json::to_string_pretty(&dataset.to_value())?;
    content.push('\n');
    Ok(content)
}

/// Replace the dataset file with `dataset`.
///
/// The content goes to a temporary file in the destination directory, is
/// synced, then renamed over `path`. On failure the previous file is left as
/// it was. Existing file permissions are kept; a new file gets mode 0644 on
/// Unix instead of the temp file's 0600.
pub fn persist_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let content = render_dataset(dataset)?;

    let write_err = |e: std::io::Error| DatasetError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;

    match std::fs::metadata(path) {
        Ok(existing) => tmp
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?,
        Err(_) => set_new_file_permissions(tmp.as_file()).map_err(write_err)?,
    }
    tmp.as_file().sync_all().map_err(write_err)?;

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    tracing::info!("Wrote {} records to {:?}", dataset.countries().len(), path);
    Ok(())
}

#[cfg(unix)]
fn set_new_file_permissions(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}
