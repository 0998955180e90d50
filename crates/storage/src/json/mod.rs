//! JSON-file storage adapters.
//!
//! Every persisted artifact is a standalone JSON file: the catalog export
//! (read-only), the status autosave, and the settings. Writes go through a
//! temp-file-and-rename so a concurrent reader never observes a partial file.

mod catalog;
mod io;
mod settings_repo;
mod status_repo;

pub use catalog::JsonCatalogSource;
pub use settings_repo::JsonSettingsRepository;
pub use status_repo::JsonStatusRepository;
