use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use progress_core::model::StatusStore;

use crate::json::io::{read_value, write_value_atomic};
use crate::repository::{StatusRepository, StorageError};

/// Status autosave file: `{lecture_id: "<plain-text status>"}`.
///
/// Loading also accepts the legacy layout where the map lived under a
/// `"statuses"` key next to the raw course data; saving always writes the
/// flat map.
pub struct JsonStatusRepository {
    path: PathBuf,
}

impl JsonStatusRepository {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StatusRepository for JsonStatusRepository {
    fn load_statuses(&self) -> Result<StatusStore, StorageError> {
        let Some(value) = read_value(&self.path)? else {
            debug!("no autosave at {}, starting empty", self.path.display());
            return Ok(StatusStore::new());
        };
        Ok(store_from_value(&value))
    }

    fn save_statuses(&self, store: &StatusStore) -> Result<(), StorageError> {
        write_value_atomic(&self.path, store)?;
        debug!("saved {} statuses to {}", store.len(), self.path.display());
        Ok(())
    }
}

fn store_from_value(value: &Value) -> StatusStore {
    let Some(root) = value.as_object() else {
        warn!("status file root is not an object, starting empty");
        return StatusStore::new();
    };

    // Legacy autosave bundled the course data and the statuses together.
    let entries = match root.get("statuses").and_then(Value::as_object) {
        Some(nested) => nested,
        None => root,
    };

    StatusStore::from_raw(
        entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s))),
    )
}
