//! Aggregated findings and the identifiers attached to them.
//!
//! A [`Finding`] is the single deduplicated record for one pattern. It is
//! created on the pattern's first match and afterwards only grows its list
//! of evidence ids. [`FindingSnapshot`] is the owned, serialisable copy that
//! is handed to a `FindingSink`.

mod excerpt;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use excerpt::{ELLIPSIS, EXCERPT_MAX_CHARS, excerpt};

use crate::pattern::{Pattern, PatternId};

/// Opaque identifier of one inspected text (for example a response id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceId(u64);

impl EvidenceId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EvidenceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of where an inspected text came from, usually a URL
/// or a file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLocation(Arc<str>);

impl SourceLocation {
    /// Creates a location from any string-like value.
    #[must_use]
    pub fn new(location: impl Into<Arc<str>>) -> Self {
        Self(location.into())
    }

    /// Returns the location as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceLocation {
    fn from(location: &str) -> Self {
        Self::new(location)
    }
}

impl From<String> for SourceLocation {
    fn from(location: String) -> Self {
        Self::new(location)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The deduplicated record of every match attributed to one pattern.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Pattern this finding belongs to.
    pub pattern: PatternId,
    /// Raw source of that pattern.
    pub pattern_source: Arc<str>,
    /// Short title, `User defined regex - <source>`.
    pub name: Box<str>,
    /// Description fixed at creation; embeds the first matched excerpt.
    pub description: Box<str>,
    /// Location of the first matching text.
    pub source_location: SourceLocation,
    /// Every evidence id that matched, in arrival order. Append-only.
    pub evidence_ids: Vec<EvidenceId>,
}

impl Finding {
    /// Creates the finding for `pattern`'s first match.
    #[must_use]
    pub fn new(pattern: &Pattern, matched: &str, evidence_id: EvidenceId, source_location: SourceLocation) -> Self {
        Self {
            pattern: pattern.id,
            pattern_source: Arc::clone(&pattern.source),
            name: format!("User defined regex - {}", pattern.source).into(),
            description: describe_match(&pattern.source, matched).into(),
            source_location,
            evidence_ids: vec![evidence_id],
        }
    }

    /// Records another matching text. The description is left unchanged.
    pub fn record(&mut self, evidence_id: EvidenceId) {
        self.evidence_ids.push(evidence_id);
    }

    /// Returns an owned copy suitable for a sink.
    #[must_use]
    pub fn snapshot(&self) -> FindingSnapshot {
        FindingSnapshot {
            pattern_source: self.pattern_source.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            source_location: self.source_location.clone(),
            evidence_ids: self.evidence_ids.clone(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{} matches]",
            self.source_location,
            self.name,
            self.evidence_ids.len()
        )
    }
}

/// Owned export of a [`Finding`], keyed by `pattern_source` in a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSnapshot {
    /// Raw source of the pattern that matched.
    pub pattern_source: String,
    /// Short title.
    pub name: String,
    /// Human-readable description including the first matched excerpt.
    pub description: String,
    /// Location of the first matching text.
    pub source_location: SourceLocation,
    /// Evidence ids in arrival order.
    pub evidence_ids: Vec<EvidenceId>,
}

/// Builds the description stored on a new finding.
#[must_use]
pub fn describe_match(pattern_source: &str, matched: &str) -> String {
    format!(
        "The response matches the user defined regular expression \"{pattern_source}\":\n{}\n",
        excerpt(matched)
    )
}

/// Builds the one-time notification sent when a finding is created.
#[must_use]
pub fn creation_message(pattern_source: &str, matched: &str) -> String {
    format!(
        "User defined regular expression \"{pattern_source}\" matched a response! Matched string is: \"{}\".",
        excerpt(matched)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_pattern;

    #[test]
    fn evidence_id_round_trips_raw_value() {
        let id = EvidenceId::from(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn source_location_displays_as_plain_string() {
        let location = SourceLocation::from("http://example.com/");
        assert_eq!(location.to_string(), "http://example.com/");
        assert_eq!(location.as_str(), "http://example.com/");
    }

    #[test]
    fn new_finding_starts_with_single_evidence_id() {
        let pattern = make_pattern(0, "hello");
        let finding = Finding::new(&pattern, "hello", EvidenceId::new(7), "a.html".into());

        assert_eq!(finding.pattern, PatternId::new(0));
        assert_eq!(finding.evidence_ids, vec![EvidenceId::new(7)]);
        assert_eq!(finding.source_location.as_str(), "a.html");
        assert_eq!(finding.name.as_ref(), "User defined regex - hello");
    }

    #[test]
    fn record_appends_without_touching_description() {
        let pattern = make_pattern(0, "hello");
        let mut finding = Finding::new(&pattern, "hello", EvidenceId::new(1), "a".into());
        let description = finding.description.clone();

        finding.record(EvidenceId::new(2));
        finding.record(EvidenceId::new(2));

        assert_eq!(
            finding.evidence_ids,
            vec![EvidenceId::new(1), EvidenceId::new(2), EvidenceId::new(2)]
        );
        assert_eq!(finding.description, description);
    }

    #[test]
    fn describe_match_embeds_source_and_match() {
        let description = describe_match("\".*?\"", "\"data.txt\"");
        assert_eq!(
            description,
            "The response matches the user defined regular expression \"\".*?\"\":\n\"data.txt\"\n"
        );
    }

    #[test]
    fn describe_match_truncates_long_matches() {
        let description = describe_match("a+", &"a".repeat(50));
        assert!(description.contains(&format!("{}...", "a".repeat(20))));
        assert!(!description.contains(&"a".repeat(21)));
    }

    #[test]
    fn creation_message_names_pattern_and_excerpt() {
        let message = creation_message("hel+o", "hello");
        assert_eq!(
            message,
            "User defined regular expression \"hel+o\" matched a response! Matched string is: \"hello\"."
        );
    }

    #[test]
    fn snapshot_copies_all_fields() {
        let pattern = make_pattern(3, "x");
        let mut finding = Finding::new(&pattern, "x", EvidenceId::new(1), "loc".into());
        finding.record(EvidenceId::new(9));

        let snapshot = finding.snapshot();

        assert_eq!(snapshot.pattern_source, "x");
        assert_eq!(snapshot.name, "User defined regex - x");
        assert_eq!(snapshot.source_location.as_str(), "loc");
        assert_eq!(snapshot.evidence_ids, vec![EvidenceId::new(1), EvidenceId::new(9)]);
    }

    #[test]
    fn finding_display_shows_location_and_count() {
        let pattern = make_pattern(0, "x");
        let finding = Finding::new(&pattern, "x", EvidenceId::new(1), "page".into());
        assert_eq!(finding.to_string(), "page: User defined regex - x [1 matches]");
    }
}
