//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use progress_core::model::CourseId;
use storage::repository::StorageError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("unknown course: {0}")]
    UnknownCourse(CourseId),

    #[error("course {course} has no section at index {index}")]
    UnknownSection { course: CourseId, index: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while exporting Markdown reports.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("cannot write report {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
