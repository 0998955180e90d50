#![forbid(unsafe_code)]

pub mod error;
pub mod progress_service;
pub mod report;

pub use error::{ProgressError, ReportError};
pub use progress_service::ProgressService;
