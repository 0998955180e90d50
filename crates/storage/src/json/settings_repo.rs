use std::path::{Path, PathBuf};

use log::debug;

use progress_core::model::AppSettings;

use crate::json::io::{read_value, write_value_atomic};
use crate::repository::{SettingsRepository, StorageError};

/// Settings file adapter. Unknown keys are ignored and missing keys fall
/// back to defaults, so files from older versions keep loading.
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SettingsRepository for JsonSettingsRepository {
    fn load_settings(&self) -> Result<AppSettings, StorageError> {
        let Some(value) = read_value(&self.path)? else {
            debug!("no settings at {}, using defaults", self.path.display());
            return Ok(AppSettings::default());
        };
        serde_json::from_value(value).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        write_value_atomic(&self.path, settings)
    }
}
