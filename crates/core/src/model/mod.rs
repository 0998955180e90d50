mod app_settings;
mod course;
mod ids;
mod status;
mod status_store;

pub use app_settings::AppSettings;
pub use course::{Catalog, Course, Lecture, Progress, Section, StatusBreakdown};
pub use ids::{CourseId, LectureId};
pub use status::{MasterSelection, Status, UnknownStatusError, MASTER_PLACEHOLDER};
pub use status_store::StatusStore;
