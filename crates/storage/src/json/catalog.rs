use std::path::{Path, PathBuf};

use log::warn;
use serde_json::Value;

use progress_core::model::{Catalog, Course, CourseId, Lecture, LectureId, Section, Status};

use crate::json::io::read_value;
use crate::repository::{CatalogSource, StorageError};

/// Reads the course hierarchy from a Udemy catalog export.
///
/// The export schema is owned by the external scraper, so parsing is
/// defensive throughout: every field is optional and falls back to a
/// placeholder or an empty list.
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for JsonCatalogSource {
    fn load_catalog(&self) -> Result<Catalog, StorageError> {
        let Some(value) = read_value(&self.path)? else {
            warn!("catalog export {} not found, starting empty", self.path.display());
            return Ok(Catalog::default());
        };
        Ok(parse_catalog(&value))
    }
}

/// Parses an already-deserialized export. Top level is an object mapping
/// course id to course data; anything else yields an empty catalog.
#[must_use]
pub fn parse_catalog(value: &Value) -> Catalog {
    let Some(entries) = value.as_object() else {
        warn!("catalog export root is not an object, ignoring");
        return Catalog::default();
    };

    let courses = entries
        .iter()
        .map(|(id, course)| parse_course(CourseId::new(id.clone()), course))
        .collect();
    Catalog { courses }
}

fn parse_course(id: CourseId, value: &Value) -> Course {
    let data = value
        .get("curriculum_context")
        .and_then(|c| c.get("data"))
        .unwrap_or(&Value::Null);

    let sections = data
        .get("sections")
        .and_then(Value::as_array)
        .map(|sections| {
            sections
                .iter()
                .map(|section| parse_section(&id, section))
                .collect()
        })
        .unwrap_or_default();

    Course {
        title: str_field(data, "course_title").unwrap_or_else(|| "Untitled".to_owned()),
        instructor: str_field(value, "instructor"),
        url: str_field(data, "course_url"),
        sections,
        id,
    }
}

fn parse_section(course_id: &CourseId, value: &Value) -> Section {
    let title = str_field(value, "title").unwrap_or_else(|| "Untitled Section".to_owned());

    let lectures = value
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| parse_lecture(course_id, &title, idx, item))
                .collect()
        })
        .unwrap_or_default();

    Section {
        length_text: str_field(value, "content_length_text"),
        title,
        lectures,
    }
}

fn parse_lecture(course_id: &CourseId, section_title: &str, idx: usize, value: &Value) -> Lecture {
    let title = str_field(value, "title").unwrap_or_else(|| "Untitled Item".to_owned());

    // object_index appears as both a number and a string in the wild; the
    // item's position is the fallback so ids stay derivable.
    let object_index = match value.get("object_index") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => idx.to_string(),
    };

    Lecture {
        id: LectureId::compose(course_id, section_title, &title, &object_index),
        duration: str_field(value, "content_summary"),
        learn_url: str_field(value, "learn_url"),
        title,
        status: Status::default(),
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_export() -> Value {
        json!({
            "101": {
                "instructor": "Jane Doe",
                "curriculum_context": {
                    "data": {
                        "course_title": "Rust from Scratch",
                        "course_url": "https://example.com/rust",
                        "sections": [
                            {
                                "title": "Basics",
                                "content_length_text": "1h 30m",
                                "items": [
                                    {
                                        "title": "Welcome",
                                        "object_index": 1,
                                        "content_summary": "05:00",
                                        "learn_url": "https://example.com/l/1"
                                    },
                                    { "title": "Setup", "object_index": "2" }
                                ]
                            }
                        ]
                    }
                }
            }
        })
    }

    #[test]
    fn parses_full_export() {
        let catalog = parse_catalog(&sample_export());
        assert_eq!(catalog.courses.len(), 1);

        let course = &catalog.courses[0];
        assert_eq!(course.id, CourseId::new("101"));
        assert_eq!(course.title, "Rust from Scratch");
        assert_eq!(course.instructor.as_deref(), Some("Jane Doe"));
        assert_eq!(course.sections.len(), 1);

        let section = &course.sections[0];
        assert_eq!(section.title, "Basics");
        assert_eq!(section.length_text.as_deref(), Some("1h 30m"));
        assert_eq!(section.lectures.len(), 2);

        let welcome = &section.lectures[0];
        assert_eq!(welcome.id.as_str(), "101-Basics-Welcome-1");
        assert_eq!(welcome.duration.as_deref(), Some("05:00"));
        assert_eq!(welcome.status, Status::NotDone);

        // numeric and string object_index both key the same way
        assert_eq!(section.lectures[1].id.as_str(), "101-Basics-Setup-2");
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let catalog = parse_catalog(&json!({"x": {}}));
        let course = &catalog.courses[0];
        assert_eq!(course.title, "Untitled");
        assert!(course.instructor.is_none());
        assert!(course.sections.is_empty());
    }

    #[test]
    fn missing_object_index_uses_position() {
        let catalog = parse_catalog(&json!({
            "c": {"curriculum_context": {"data": {"sections": [
                {"title": "S", "items": [{"title": "A"}, {"title": "B"}]}
            ]}}}
        }));
        let section = &catalog.courses[0].sections[0];
        assert_eq!(section.lectures[0].id.as_str(), "c-S-A-0");
        assert_eq!(section.lectures[1].id.as_str(), "c-S-B-1");
    }

    #[test]
    fn non_object_root_is_empty_catalog() {
        assert!(parse_catalog(&json!([1, 2, 3])).is_empty());
        assert!(parse_catalog(&json!("nope")).is_empty());
    }
}
