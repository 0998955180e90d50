use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::LectureId;
use crate::model::status::Status;

/// Persisted mapping from lecture id to status.
///
/// This is the sole persisted progress artifact. It is independent of the
/// course hierarchy so re-importing a refreshed catalog does not destroy
/// prior progress for lectures whose ids are unchanged. Entries are held
/// canonically; only plain-text forms ever reach disk (see the `Status`
/// serde impls). The `BTreeMap` keeps serialized output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusStore {
    entries: BTreeMap<LectureId, Status>,
}

impl StatusStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from raw persisted strings, normalizing each value
    /// through the fail-soft parser (legacy plain text, display forms, and
    /// garbage all resolve to a canonical status).
    #[must_use]
    pub fn from_raw<I, K, V>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let entries = raw
            .into_iter()
            .map(|(k, v)| (LectureId::new(k), Status::parse(v.as_ref())))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, id: &LectureId) -> Option<Status> {
        self.entries.get(id).copied()
    }

    /// Status for a lecture, defaulting when the id has never been recorded.
    #[must_use]
    pub fn status_or_default(&self, id: &LectureId) -> Status {
        self.get(id).unwrap_or_default()
    }

    pub fn set(&mut self, id: LectureId, status: Status) {
        self.entries.insert(id, status);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LectureId, Status)> {
        self.entries.iter().map(|(id, status)| (id, *status))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
