use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

//
// ─── STATUS VOCABULARY ─────────────────────────────────────────────────────────
//

/// Per-lecture progress status.
///
/// The variant order is significant: it defines the dropdown order in any
/// front end and the index used as the default (`NotDone` is index 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    #[default]
    NotDone,
    InProgress,
    Done,
    Important,
    ComeBackLater,
    Skip,
    Maybe,
    Ignore,
}

/// Dropdown placeholder for the master-status control. Selecting it is a no-op.
pub const MASTER_PLACEHOLDER: &str = "---";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized status: {raw:?}")]
pub struct UnknownStatusError {
    pub raw: String,
}

impl Status {
    /// All statuses in vocabulary order.
    pub const ALL: [Status; 8] = [
        Status::NotDone,
        Status::InProgress,
        Status::Done,
        Status::Important,
        Status::ComeBackLater,
        Status::Skip,
        Status::Maybe,
        Status::Ignore,
    ];

    /// Canonical plain-text form, the only form that goes to disk.
    #[must_use]
    pub fn as_plain(self) -> &'static str {
        match self {
            Status::NotDone => "Not Done",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
            Status::Important => "Important",
            Status::ComeBackLater => "Come Back Later",
            Status::Skip => "Skip",
            Status::Maybe => "Maybe",
            Status::Ignore => "Ignore",
        }
    }

    /// Emoji-decorated display form, reconstructed at render time.
    #[must_use]
    pub fn display(self) -> &'static str {
        match self {
            Status::NotDone => "❌ Not Done",
            Status::InProgress => "⏳ In Progress",
            Status::Done => "✅ Done",
            Status::Important => "⭐ Important",
            Status::ComeBackLater => "⏰ Come Back Later",
            Status::Skip => "⏭ Skip",
            Status::Maybe => "⏳ Maybe",
            Status::Ignore => "🚫 Ignore",
        }
    }

    /// Position within [`Status::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        Status::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// Strict parse accepting either the plain or the display form,
    /// case-insensitively and ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStatusError` when the string matches neither form.
    pub fn try_parse(raw: &str) -> Result<Status, UnknownStatusError> {
        let cleaned = raw.trim();
        for status in Status::ALL {
            if cleaned.eq_ignore_ascii_case(status.as_plain())
                || cleaned.eq_ignore_ascii_case(status.display())
            {
                return Ok(status);
            }
        }
        Err(UnknownStatusError {
            raw: raw.to_owned(),
        })
    }

    /// Fail-soft parse: unrecognized values (hand-edited or corrupted
    /// persisted files) coerce to the default instead of erroring.
    #[must_use]
    pub fn parse(raw: &str) -> Status {
        Status::try_parse(raw).unwrap_or_default()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_plain())
    }
}

// Persisted form is always the canonical plain text; deserialization goes
// through the fail-soft parser so legacy and unknown values load cleanly.

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_plain())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Status::parse(&raw))
    }
}

//
// ─── MASTER STATUS ─────────────────────────────────────────────────────────────
//

/// Selection of the bulk "master status" control for a section.
///
/// `Keep` is the `"---"` placeholder guarding against accidental bulk
/// changes; applying it leaves every lecture untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterSelection {
    Keep,
    Set(Status),
}

impl MasterSelection {
    /// Parses a dropdown value. The placeholder and anything unrecognized
    /// map to `Keep`; recognized statuses map to `Set`.
    #[must_use]
    pub fn parse(raw: &str) -> MasterSelection {
        if raw.trim() == MASTER_PLACEHOLDER {
            return MasterSelection::Keep;
        }
        match Status::try_parse(raw) {
            Ok(status) => MasterSelection::Set(status),
            Err(_) => MasterSelection::Keep,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
