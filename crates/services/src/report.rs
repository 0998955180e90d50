//! Markdown report generation and export.
//!
//! Rendering is a pure function of the reconciled catalog, so generating the
//! same report twice yields byte-identical output.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use progress_core::model::{Catalog, Course, Section};

use crate::error::ReportError;

/// Filename of the concatenated all-courses report.
pub const COMBINED_FILENAME: &str = "All Courses - Combined Markdown.md";

/// Renders one course as a standalone Markdown document.
#[must_use]
pub fn course_markdown(course: &Course) -> String {
    let mut md = String::new();

    match course.instructor.as_deref() {
        Some(instructor) => {
            let _ = writeln!(md, "# 📚 {} (👨‍🏫 {instructor})", course.title);
        }
        None => {
            let _ = writeln!(md, "# 📚 {}", course.title);
        }
    }

    let progress = course.progress();
    let _ = writeln!(
        md,
        "\n**Progress:** {}/{} lectures complete ({}%)\n",
        progress.done,
        progress.total,
        progress.percent()
    );

    for section in &course.sections {
        write_section(&mut md, section);
    }

    md
}

fn write_section(md: &mut String, section: &Section) {
    let progress = section.progress();
    let _ = write!(
        md,
        "## 📂 {} — ✅ {}/{} lectures",
        section.title, progress.done, progress.total
    );
    if let Some(length) = section.length_text.as_deref() {
        let _ = write!(md, " • ⏱ {length}");
    }
    md.push_str("\n\n");

    for lecture in &section.lectures {
        let _ = write!(md, "- {} **{}**", lecture.status.display(), lecture.title);
        if let Some(duration) = lecture.duration.as_deref() {
            let _ = write!(md, " · ⏱ {duration}");
        }
        if let Some(url) = lecture.learn_url.as_deref() {
            let _ = write!(md, " · [▶️ Learn]({url})");
        }
        md.push('\n');
    }
    md.push('\n');
}

/// Concatenates every per-course document under one top-level heading, in
/// catalog order.
#[must_use]
pub fn combined_markdown(catalog: &Catalog) -> String {
    let mut md = String::from("# 📚 Course TODO List\n\n");
    for course in &catalog.courses {
        md.push_str(&course_markdown(course));
        md.push_str("---\n\n");
    }
    md
}

/// Strips characters unsafe for filesystem paths and collapses whitespace.
///
/// Deterministic by construction. Distinct titles may sanitize to the same
/// name; that collision is accepted and the last writer wins.
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| {
            !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|') && !c.is_control()
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Export filename for one course: `{id} - {title}.md`, sanitized.
#[must_use]
pub fn course_filename(course: &Course) -> String {
    sanitize_filename(&format!("{} - {}.md", course.id, course.title))
}

/// Writes one Markdown file per course plus the combined report into `dir`,
/// returning the written paths.
///
/// # Errors
///
/// Returns `ReportError::Io` if the directory or any file cannot be written.
pub fn export_all(catalog: &Catalog, dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(catalog.courses.len() + 1);
    for course in &catalog.courses {
        let path = dir.join(course_filename(course));
        write_report(&path, &course_markdown(course))?;
        written.push(path);
    }

    let combined = dir.join(COMBINED_FILENAME);
    write_report(&combined, &combined_markdown(catalog))?;
    written.push(combined);

    info!("exported {} report files to {}", written.len(), dir.display());
    Ok(written)
}

fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
