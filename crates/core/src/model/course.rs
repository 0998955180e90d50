use crate::model::ids::{CourseId, LectureId};
use crate::model::status::{MasterSelection, Status};
use crate::model::status_store::StatusStore;

//
// ─── COURSE HIERARCHY ──────────────────────────────────────────────────────────
//

/// A single lecture. Identity and title come from the catalog export and are
/// immutable for the session; only the status mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecture {
    pub id: LectureId,
    pub title: String,
    pub duration: Option<String>,
    pub learn_url: Option<String>,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub length_text: Option<String>,
    pub lectures: Vec<Lecture>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub instructor: Option<String>,
    pub url: Option<String>,
    pub sections: Vec<Section>,
}

/// All loaded courses, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub courses: Vec<Course>,
}

//
// ─── AGGREGATION ───────────────────────────────────────────────────────────────
//

/// Done-vs-total completion counts. Always derived, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Rounded completion percentage; `0` when there are no lectures.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (100.0 * self.done as f64 / self.total as f64).round() as u32
    }
}

/// Per-status lecture counts, in vocabulary order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    counts: [usize; Status::ALL.len()],
}

impl StatusBreakdown {
    pub fn record(&mut self, status: Status) {
        self.counts[status.index()] += 1;
    }

    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.counts[status.index()]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Section {
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            done: self
                .lectures
                .iter()
                .filter(|l| l.status == Status::Done)
                .count(),
            total: self.lectures.len(),
        }
    }

    /// Bulk-sets every lecture status. The placeholder selection is a no-op.
    pub fn apply_master(&mut self, selection: MasterSelection) {
        let MasterSelection::Set(status) = selection else {
            return;
        };
        for lecture in &mut self.lectures {
            lecture.status = status;
        }
    }
}

impl Course {
    /// Course-wide completion summed across all sections.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.sections
            .iter()
            .map(Section::progress)
            .fold(Progress::default(), |acc, p| Progress {
                done: acc.done + p.done,
                total: acc.total + p.total,
            })
    }

    #[must_use]
    pub fn breakdown(&self) -> StatusBreakdown {
        let mut breakdown = StatusBreakdown::default();
        for section in &self.sections {
            for lecture in &section.lectures {
                breakdown.record(lecture.status);
            }
        }
        breakdown
    }

    pub fn lectures_mut(&mut self) -> impl Iterator<Item = &mut Lecture> {
        self.sections.iter_mut().flat_map(|s| s.lectures.iter_mut())
    }
}

impl Catalog {
    /// Populates every lecture's status from the store, defaulting lectures
    /// the store has never seen. Pure with respect to its inputs and
    /// idempotent: reconciling twice with the same store changes nothing.
    pub fn reconcile(&mut self, store: &StatusStore) {
        for course in &mut self.courses {
            for lecture in course.lectures_mut() {
                lecture.status = store.status_or_default(&lecture.id);
            }
        }
    }

    #[must_use]
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == id)
    }

    pub fn course_mut(&mut self, id: &CourseId) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn lecture(id: &str, status: Status) -> Lecture {
        Lecture {
            id: id.into(),
            title: format!("Lecture {id}"),
            duration: None,
            learn_url: None,
            status,
        }
    }

    fn section(title: &str, lectures: Vec<Lecture>) -> Section {
        Section {
            title: title.to_owned(),
            length_text: None,
            lectures,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog {
            courses: vec![Course {
                id: CourseId::new("101"),
                title: "Rust".to_owned(),
                instructor: None,
                url: None,
                sections: vec![
                    section(
                        "Basics",
                        vec![
                            lecture("L1", Status::NotDone),
                            lecture("L2", Status::NotDone),
                        ],
                    ),
                    section("Advanced", vec![lecture("L3", Status::NotDone)]),
                ],
            }],
        }
    }

    #[test]
    fn section_progress_counts_done_only() {
        let sec = section(
            "S",
            vec![
                lecture("a", Status::Done),
                lecture("b", Status::Done),
                lecture("c", Status::NotDone),
                lecture("d", Status::Skip),
            ],
        );
        let p = sec.progress();
        assert_eq!((p.done, p.total, p.percent()), (2, 4, 50));
    }

    #[test]
    fn empty_section_percent_is_zero() {
        let p = section("empty", vec![]).progress();
        assert_eq!(p.percent(), 0);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(Progress { done: 1, total: 3 }.percent(), 33);
        assert_eq!(Progress { done: 2, total: 3 }.percent(), 67);
        assert_eq!(Progress { done: 3, total: 3 }.percent(), 100);
    }

    #[test]
    fn course_progress_sums_sections() {
        let mut catalog = sample_catalog();
        catalog.courses[0].sections[0].lectures[0].status = Status::Done;
        catalog.courses[0].sections[1].lectures[0].status = Status::Done;

        let p = catalog.courses[0].progress();
        assert_eq!((p.done, p.total), (2, 3));
        assert_eq!(p.percent(), 67);
    }

    #[test]
    fn reconcile_applies_store_and_defaults_missing() {
        let mut catalog = sample_catalog();
        let store = StatusStore::from_raw([("L1", "Done"), ("L3", "⏭ Skip")]);

        catalog.reconcile(&store);

        let course = &catalog.courses[0];
        assert_eq!(course.sections[0].lectures[0].status, Status::Done);
        assert_eq!(course.sections[0].lectures[1].status, Status::NotDone);
        assert_eq!(course.sections[1].lectures[0].status, Status::Skip);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut once = sample_catalog();
        let store = StatusStore::from_raw([("L1", "Done"), ("L2", "In Progress")]);
        once.reconcile(&store);

        let mut twice = once.clone();
        twice.reconcile(&store);
        assert_eq!(once, twice);
    }

    #[test]
    fn legacy_and_display_stores_reconcile_identically() {
        let plain = StatusStore::from_raw([("L1", "Done")]);
        let display = StatusStore::from_raw([("L1", "✅ Done")]);

        let mut a = sample_catalog();
        let mut b = sample_catalog();
        a.reconcile(&plain);
        b.reconcile(&display);
        assert_eq!(a, b);
    }

    #[test]
    fn apply_master_sets_every_lecture() {
        let mut sec = section(
            "S",
            vec![lecture("a", Status::NotDone), lecture("b", Status::Skip)],
        );
        sec.apply_master(MasterSelection::Set(Status::Done));
        assert!(sec.lectures.iter().all(|l| l.status == Status::Done));
    }

    #[test]
    fn apply_master_placeholder_is_noop() {
        let mut sec = section(
            "S",
            vec![lecture("a", Status::NotDone), lecture("b", Status::Skip)],
        );
        let before = sec.clone();
        sec.apply_master(MasterSelection::Keep);
        assert_eq!(sec, before);
    }

    #[test]
    fn breakdown_counts_per_status() {
        let mut catalog = sample_catalog();
        catalog.courses[0].sections[0].lectures[0].status = Status::Done;
        catalog.courses[0].sections[0].lectures[1].status = Status::Important;

        let breakdown = catalog.courses[0].breakdown();
        assert_eq!(breakdown.count(Status::Done), 1);
        assert_eq!(breakdown.count(Status::Important), 1);
        assert_eq!(breakdown.count(Status::NotDone), 1);
        assert_eq!(breakdown.total(), 3);
    }
}
