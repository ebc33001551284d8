//! Atomic file operations for crash-safe persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use turnstile_core::StorageError;

/// Writes data to a file atomically.
///
/// Writes to a temporary file first, then renames it to the target path,
/// so the file is never observable in a partially written state even if
/// the process crashes mid-write.
///
/// # Errors
/// Returns an error if the write or rename fails.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Temp file in the same directory, for a same-filesystem rename
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|source| {
        StorageError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    temp_file
        .write_all(data)
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file
        .flush()
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file.persist(path).map_err(|e| StorageError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Writes JSON to a file atomically.
pub fn atomic_write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Reads and deserializes JSON from a file, returning `None` if the file
/// doesn't exist.
pub fn read_json_optional<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&data)?;
    Ok(Some(value))
}
