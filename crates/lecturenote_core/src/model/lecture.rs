//! Lecture (slide deck + per-slide notes) records.
//!
//! # Invariants
//! - `class_id` names the owning class but is never verified against it.
//! - Updates replace the whole record; `merge` is the only way fields change.

use super::class::ClassId;
use super::notes::SlideNotes;
use super::timestamp::{self, Timestamp};
use super::{validate_name, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type LectureId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub id: LectureId,
    pub class_id: ClassId,
    pub name: String,
    /// Whole PDF as a data URL, see [`crate::model::pdf`].
    pub pdf_url: String,
    #[serde(default)]
    pub notes: SlideNotes,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Caller-supplied fields for a new lecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLecture {
    pub class_id: ClassId,
    pub name: String,
    pub pdf_url: String,
    pub notes: SlideNotes,
}

impl NewLecture {
    pub fn new(class_id: ClassId, name: impl Into<String>, pdf_url: impl Into<String>) -> Self {
        Self {
            class_id,
            name: name.into(),
            pdf_url: pdf_url.into(),
            notes: SlideNotes::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        self.notes.validate()
    }

    pub fn into_lecture(self) -> Lecture {
        let now = timestamp::now();
        Lecture {
            id: Uuid::new_v4(),
            class_id: self.class_id,
            name: self.name,
            pdf_url: self.pdf_url,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial field set for `update_lecture`. `None` keeps the current value;
/// `notes` replaces the whole map when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LecturePatch {
    pub class_id: Option<ClassId>,
    pub name: Option<String>,
    pub pdf_url: Option<String>,
    pub notes: Option<SlideNotes>,
}

impl LecturePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn notes(notes: SlideNotes) -> Self {
        Self {
            notes: Some(notes),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.class_id.is_none()
            && self.name.is_none()
            && self.pdf_url.is_none()
            && self.notes.is_none()
    }
}

impl Lecture {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        self.notes.validate()
    }

    /// Returns this record with `patch` applied and `updated_at` advanced.
    /// `id` and `created_at` are carried over untouched.
    pub fn merge(&self, patch: LecturePatch) -> Lecture {
        Lecture {
            id: self.id,
            class_id: patch.class_id.unwrap_or(self.class_id),
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            pdf_url: patch.pdf_url.unwrap_or_else(|| self.pdf_url.clone()),
            notes: patch.notes.unwrap_or_else(|| self.notes.clone()),
            created_at: self.created_at,
            updated_at: timestamp::next_update_stamp(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LecturePatch, NewLecture};
    use crate::model::notes::SlideNotes;
    use uuid::Uuid;

    #[test]
    fn merge_keeps_unspecified_fields() {
        let mut new = NewLecture::new(Uuid::new_v4(), "Week 1", "data:application/pdf;base64,");
        new.notes.set(1, "abc").unwrap();
        let lecture = new.into_lecture();

        let merged = lecture.merge(LecturePatch::name("X"));
        assert_eq!(merged.name, "X");
        assert_eq!(merged.notes, lecture.notes);
        assert_eq!(merged.pdf_url, lecture.pdf_url);
        assert_eq!(merged.class_id, lecture.class_id);
        assert_eq!(merged.id, lecture.id);
    }

    #[test]
    fn merge_advances_updated_at_only() {
        let lecture = NewLecture::new(Uuid::new_v4(), "Week 1", "").into_lecture();

        let merged = lecture.merge(LecturePatch::notes(SlideNotes::new()));
        assert_eq!(merged.created_at, lecture.created_at);
        assert!(merged.updated_at > lecture.updated_at);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(LecturePatch::default().is_empty());
        assert!(!LecturePatch::name("n").is_empty());
    }
}
