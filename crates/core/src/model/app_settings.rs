use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::CourseId;

/// Persisted user preferences.
///
/// Field names mirror the legacy `settings.json` keys so files written by
/// earlier versions keep loading; every field has a serde default so missing
/// keys fall back instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default, rename = "autosave_setting")]
    pub autosave: bool,
    #[serde(default = "default_preload")]
    pub preload: bool,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub selected_course: Option<CourseId>,
    #[serde(default)]
    pub favorites: BTreeMap<CourseId, bool>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            autosave: false,
            preload: true,
            filter: default_filter(),
            selected_course: None,
            favorites: BTreeMap::new(),
        }
    }
}

impl AppSettings {
    #[must_use]
    pub fn is_favorite(&self, course: &CourseId) -> bool {
        self.favorites.get(course).copied().unwrap_or(false)
    }

    pub fn set_favorite(&mut self, course: CourseId, favorite: bool) {
        self.favorites.insert(course, favorite);
    }
}

fn default_preload() -> bool {
    true
}

fn default_filter() -> String {
    "All".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run_behavior() {
        let settings = AppSettings::default();
        assert!(!settings.autosave);
        assert!(settings.preload);
        assert_eq!(settings.filter, "All");
        assert!(settings.selected_course.is_none());
        assert!(settings.favorites.is_empty());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn legacy_key_names_load() {
        let settings: AppSettings = serde_json::from_str(
            r#"{
                "autosave_setting": true,
                "preload": false,
                "filter": "✅ Done",
                "selected_course": "101",
                "favorites": {"101": true}
            }"#,
        )
        .unwrap();
        assert!(settings.autosave);
        assert!(!settings.preload);
        assert_eq!(settings.filter, "✅ Done");
        assert_eq!(settings.selected_course, Some(CourseId::new("101")));
        assert!(settings.is_favorite(&CourseId::new("101")));
    }

    #[test]
    fn favorite_toggle_round_trips() {
        let mut settings = AppSettings::default();
        let course = CourseId::new("abc");
        assert!(!settings.is_favorite(&course));
        settings.set_favorite(course.clone(), true);
        assert!(settings.is_favorite(&course));
    }
}
