use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use progress_core::model::{AppSettings, Catalog, StatusStore};

use crate::json::{JsonCatalogSource, JsonSettingsRepository, JsonStatusRepository};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed json in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("serialization failed for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Source of the course hierarchy. Read-only: the catalog is rebuilt fresh
/// from the export on every load and never written back.
pub trait CatalogSource: Send + Sync {
    /// Load the catalog. A missing export yields an empty catalog; only an
    /// unreadable or unparsable file is an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source exists but cannot be parsed.
    fn load_catalog(&self) -> Result<Catalog, StorageError>;
}

/// Persistence contract for the per-lecture status map.
pub trait StatusRepository: Send + Sync {
    /// Load the persisted statuses. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be parsed.
    fn load_statuses(&self) -> Result<StatusStore, StorageError>;

    /// Persist the store, atomically replacing any prior content.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be written.
    fn save_statuses(&self, store: &StatusStore) -> Result<(), StorageError>;
}

/// Persistence contract for user settings.
pub trait SettingsRepository: Send + Sync {
    /// Load persisted settings, defaulting when no file exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be parsed.
    fn load_settings(&self) -> Result<AppSettings, StorageError>;

    /// Persist the settings, atomically replacing any prior content.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be written.
    fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

/// Simple in-memory storage implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    catalog: Arc<Mutex<Catalog>>,
    statuses: Arc<Mutex<StatusStore>>,
    settings: Arc<Mutex<AppSettings>>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
            ..Self::default()
        }
    }
}

impl CatalogSource for InMemoryStorage {
    fn load_catalog(&self) -> Result<Catalog, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl StatusRepository for InMemoryStorage {
    fn load_statuses(&self) -> Result<StatusStore, StorageError> {
        let guard = self
            .statuses
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_statuses(&self, store: &StatusStore) -> Result<(), StorageError> {
        let mut guard = self
            .statuses
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        *guard = store.clone();
        Ok(())
    }
}

impl SettingsRepository for InMemoryStorage {
    fn load_settings(&self) -> Result<AppSettings, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        *guard = settings.clone();
        Ok(())
    }
}

/// Aggregates the storage adapters behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogSource>,
    pub statuses: Arc<dyn StatusRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let backend = InMemoryStorage::new();
        Self {
            catalog: Arc::new(backend.clone()),
            statuses: Arc::new(backend.clone()),
            settings: Arc::new(backend),
        }
    }

    /// File-backed storage: catalog export, status autosave, and settings,
    /// each a standalone JSON file.
    #[must_use]
    pub fn json_files(
        catalog_path: impl AsRef<Path>,
        statuses_path: impl AsRef<Path>,
        settings_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            catalog: Arc::new(JsonCatalogSource::new(catalog_path)),
            statuses: Arc::new(JsonStatusRepository::new(statuses_path)),
            settings: Arc::new(JsonSettingsRepository::new(settings_path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progress_core::model::Status;

    #[test]
    fn in_memory_round_trips_statuses() {
        let backend = InMemoryStorage::new();
        let mut store = StatusStore::new();
        store.set("L1".into(), Status::Done);

        backend.save_statuses(&store).unwrap();
        let loaded = backend.load_statuses().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn in_memory_defaults_are_empty() {
        let backend = InMemoryStorage::new();
        assert!(backend.load_statuses().unwrap().is_empty());
        assert!(backend.load_catalog().unwrap().is_empty());
        assert_eq!(backend.load_settings().unwrap(), AppSettings::default());
    }

    #[test]
    fn storage_in_memory_wires_all_adapters() {
        let storage = Storage::in_memory();
        assert!(storage.catalog.load_catalog().unwrap().is_empty());
        storage.statuses.save_statuses(&StatusStore::new()).unwrap();
        assert_eq!(
            storage.settings.load_settings().unwrap(),
            AppSettings::default()
        );
    }

    #[test]
    fn in_memory_settings_round_trip() {
        let backend = InMemoryStorage::new();
        let mut settings = AppSettings::default();
        settings.autosave = true;
        settings.set_favorite("101".into(), true);

        backend.save_settings(&settings).unwrap();
        assert_eq!(backend.load_settings().unwrap(), settings);
    }
}
