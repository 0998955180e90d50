use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::repository::StorageError;

/// Reads and parses a JSON file. `Ok(None)` when the file does not exist.
pub(crate) fn read_value(path: &Path) -> Result<Option<Value>, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

/// Serializes `value` and replaces `path` atomically: the bytes land in a
/// sibling temp file first and are renamed into place, so readers see either
/// the old content or the new, never a torn write.
pub(crate) fn write_value_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    fs::write(&tmp, json).map_err(|source| StorageError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_value_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let value = read_value(&dir.path().join("nope.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn read_value_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_value(&path).unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_value_atomic(&path, &serde_json::json!({"k": "v"})).unwrap();

        assert!(path.exists());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep/nested/out.json");

        write_value_atomic(&path, &serde_json::json!(1)).unwrap();
        assert!(path.exists());
    }
}
