//! Per-slide rich-text notes.
//!
//! # Invariants
//! - Keys are 1-based slide numbers; entries are sparse.
//! - An entry whose markup has no visible text counts as "no note".
//! - Serialized as a JSON object keyed by the decimal slide number.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static MARKUP_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static NBSP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)&nbsp;|&#160;").expect("valid nbsp regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Sparse map from slide number to rich-text markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideNotes(BTreeMap<u32, String>);

impl SlideNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw markup for `slide`, including blank entries.
    pub fn get(&self, slide: u32) -> Option<&str> {
        self.0.get(&slide).map(String::as_str)
    }

    /// Stores `markup` for `slide`, replacing any previous entry.
    pub fn set(&mut self, slide: u32, markup: impl Into<String>) -> Result<(), ValidationError> {
        if slide == 0 {
            return Err(ValidationError::InvalidSlideNumber(slide));
        }
        self.0.insert(slide, markup.into());
        Ok(())
    }

    pub fn remove(&mut self, slide: u32) -> Option<String> {
        self.0.remove(&slide)
    }

    /// Whether `slide` carries a note with visible text.
    pub fn has_note(&self, slide: u32) -> bool {
        self.get(slide).is_some_and(|markup| !is_blank_markup(markup))
    }

    /// Ascending slide numbers that carry a visible note.
    pub fn authored_slides(&self) -> Vec<u32> {
        self.0
            .iter()
            .filter(|(_, markup)| !is_blank_markup(markup))
            .map(|(slide, _)| *slide)
            .collect()
    }

    /// Note text for `slide` with markup removed and whitespace collapsed.
    pub fn plain_text(&self, slide: u32) -> Option<String> {
        self.get(slide)
            .map(markup_to_plain_text)
            .filter(|text| !text.is_empty())
    }

    /// Number of stored entries, blank ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(slide, markup)| (*slide, markup.as_str()))
    }

    /// Rejects entries that could not have been written through [`Self::set`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.contains_key(&0) {
            return Err(ValidationError::InvalidSlideNumber(0));
        }
        Ok(())
    }
}

impl FromIterator<(u32, String)> for SlideNotes {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// True for empty, whitespace-only or tag-only markup such as `<p></p>`.
pub fn is_blank_markup(markup: &str) -> bool {
    markup_to_plain_text(markup).is_empty()
}

fn markup_to_plain_text(markup: &str) -> String {
    let without_tags = MARKUP_TAG_RE.replace_all(markup, " ");
    let without_nbsp = NBSP_RE.replace_all(&without_tags, " ");
    WHITESPACE_RE
        .replace_all(&without_nbsp, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{is_blank_markup, SlideNotes};
    use crate::model::ValidationError;

    #[test]
    fn blank_markup_variants_are_not_notes() {
        assert!(is_blank_markup(""));
        assert!(is_blank_markup("   \n"));
        assert!(is_blank_markup("<p></p>"));
        assert!(is_blank_markup("<p> <br> </p>"));
        assert!(is_blank_markup("<p>&nbsp;</p>"));
        assert!(!is_blank_markup("<p>hi</p>"));
    }

    #[test]
    fn authored_slides_are_sorted_and_skip_blank_entries() {
        let mut notes = SlideNotes::new();
        notes.set(10, "<p>ten</p>").unwrap();
        notes.set(2, "<p></p>").unwrap();
        notes.set(3, "<h1>three</h1>").unwrap();

        assert_eq!(notes.authored_slides(), vec![3, 10]);
        assert!(!notes.has_note(2));
        assert!(!notes.has_note(4));
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn slide_zero_is_rejected() {
        let mut notes = SlideNotes::new();
        assert_eq!(
            notes.set(0, "x"),
            Err(ValidationError::InvalidSlideNumber(0))
        );
    }

    #[test]
    fn plain_text_strips_tags_and_collapses_whitespace() {
        let notes: SlideNotes = [(1, "<p>Big <strong>O</strong></p>\n<ul><li>n log n</li></ul>".to_string())]
            .into_iter()
            .collect();
        assert_eq!(notes.plain_text(1).as_deref(), Some("Big O n log n"));
        assert_eq!(notes.plain_text(2), None);
    }

    #[test]
    fn serializes_as_object_keyed_by_decimal_slide_number() {
        let mut notes = SlideNotes::new();
        notes.set(1, "<p>hi</p>").unwrap();

        let json = serde_json::to_string(&notes).unwrap();
        assert_eq!(json, r#"{"1":"<p>hi</p>"}"#);

        let parsed: SlideNotes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, notes);
    }
}
