use std::sync::Arc;

use log::warn;

use progress_core::model::{
    AppSettings, Catalog, CourseId, LectureId, MasterSelection, Status, StatusStore,
};
use storage::repository::{SettingsRepository, StatusRepository, Storage};

use crate::error::ProgressError;

/// Session-scoped progress state and its persistence.
///
/// Owns the reconciled catalog, the status store, and the settings for one
/// session, and funnels every mutation through an explicit autosave hook so
/// persistence stays decoupled from whatever front end triggers the change.
pub struct ProgressService {
    catalog: Catalog,
    store: StatusStore,
    settings: AppSettings,
    statuses: Arc<dyn StatusRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        mut catalog: Catalog,
        store: StatusStore,
        settings: AppSettings,
        statuses: Arc<dyn StatusRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
    ) -> Self {
        catalog.reconcile(&store);
        Self {
            catalog,
            store,
            settings,
            statuses,
            settings_repo,
        }
    }

    /// Opens a session from storage.
    ///
    /// A malformed catalog, status, or settings file is a visible notice,
    /// not a fatal error: the session continues with an empty hierarchy,
    /// empty store, or default settings respectively.
    #[must_use]
    pub fn open(storage: &Storage) -> Self {
        let catalog = storage.catalog.load_catalog().unwrap_or_else(|err| {
            warn!("could not load catalog: {err}");
            Catalog::default()
        });
        let store = storage.statuses.load_statuses().unwrap_or_else(|err| {
            warn!("could not load statuses: {err}");
            StatusStore::new()
        });
        let settings = storage.settings.load_settings().unwrap_or_else(|err| {
            warn!("could not load settings: {err}");
            AppSettings::default()
        });

        Self::new(
            catalog,
            store,
            settings,
            Arc::clone(&storage.statuses),
            Arc::clone(&storage.settings),
        )
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Sets one lecture's status.
    ///
    /// The store accepts ids the current catalog does not contain, so
    /// progress for lectures from an older catalog import is never dropped.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if autosave is enabled and the
    /// write fails; the in-memory change is kept either way.
    pub fn set_status(&mut self, id: &LectureId, status: Status) -> Result<(), ProgressError> {
        self.store.set(id.clone(), status);
        for course in &mut self.catalog.courses {
            for lecture in course.lectures_mut() {
                if &lecture.id == id {
                    lecture.status = status;
                }
            }
        }
        self.after_mutation()
    }

    /// Applies a master-status selection to every lecture of one section.
    /// The `"---"` placeholder selection changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownCourse` / `UnknownSection` for bad
    /// targets, or `ProgressError::Storage` if the autosave write fails.
    pub fn apply_master(
        &mut self,
        course_id: &CourseId,
        section_index: usize,
        selection: MasterSelection,
    ) -> Result<(), ProgressError> {
        if selection == MasterSelection::Keep {
            return Ok(());
        }

        let course = self
            .catalog
            .course_mut(course_id)
            .ok_or_else(|| ProgressError::UnknownCourse(course_id.clone()))?;
        let section =
            course
                .sections
                .get_mut(section_index)
                .ok_or_else(|| ProgressError::UnknownSection {
                    course: course_id.clone(),
                    index: section_index,
                })?;

        section.apply_master(selection);
        for lecture in &section.lectures {
            self.store.set(lecture.id.clone(), lecture.status);
        }
        self.after_mutation()
    }

    /// Persists the status store. Manual saves and autosaves share this one
    /// code path.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on write failure; in-memory state
    /// is untouched so no progress is lost.
    pub fn save(&self) -> Result<(), ProgressError> {
        self.statuses.save_statuses(&self.store)?;
        Ok(())
    }

    pub fn set_autosave(&mut self, enabled: bool) -> Result<(), ProgressError> {
        self.settings.autosave = enabled;
        self.save_settings()
    }

    pub fn toggle_favorite(&mut self, course_id: &CourseId) -> Result<bool, ProgressError> {
        let favorite = !self.settings.is_favorite(course_id);
        self.settings.set_favorite(course_id.clone(), favorite);
        self.save_settings()?;
        Ok(favorite)
    }

    /// Remembers the selected course across sessions, persisting only on an
    /// actual change.
    pub fn select_course(&mut self, course_id: Option<CourseId>) -> Result<(), ProgressError> {
        if self.settings.selected_course == course_id {
            return Ok(());
        }
        self.settings.selected_course = course_id;
        self.save_settings()
    }

    fn save_settings(&self) -> Result<(), ProgressError> {
        self.settings_repo.save_settings(&self.settings)?;
        Ok(())
    }

    fn after_mutation(&self) -> Result<(), ProgressError> {
        if self.settings.autosave {
            self.save()
        } else {
            Ok(())
        }
    }
}
