//! Per-pattern match resolution.

use std::ops::Range;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::pattern::{PatternId, PatternSet};

/// The first match of one pattern within an inspected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    /// Pattern that matched.
    pub pattern: PatternId,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// The matched text.
    pub matched: &'t str,
}

impl PatternMatch<'_> {
    /// Returns the byte range of the match.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Runs every pattern of `set` against `text` in registration order and
/// returns the first match of each pattern that matched.
///
/// Callers normally gate this on [`PatternSet::pre_test`]; the result does
/// not depend on it.
#[must_use]
pub fn resolve<'t>(set: &PatternSet, text: &'t str) -> Vec<PatternMatch<'t>> {
    set.patterns()
        .iter()
        .filter_map(|pattern| {
            let mat = pattern.regex.find(text)?;

            #[cfg(feature = "tracing")]
            trace!(pattern = %pattern.id, start = mat.start(), end = mat.end(), "match");

            Some(PatternMatch {
                pattern: pattern.id,
                start: mat.start(),
                end: mat.end(),
                matched: mat.as_str(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::pattern_set;

    #[test]
    fn resolve_returns_empty_when_nothing_matches() {
        let set = pattern_set(&["foo", "bar"]);
        assert!(resolve(&set, "nothing here").is_empty());
    }

    #[test]
    fn resolve_reports_only_matching_patterns() {
        let set = pattern_set(&["goodbye", "hello"]);

        let matches = resolve(&set, "hello world");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pattern, PatternId::new(1));
        assert_eq!(matches[0].matched, "hello");
    }

    #[test]
    fn resolve_reports_every_matching_pattern_in_registration_order() {
        let set = pattern_set(&["world", "hello", "absent"]);

        let matches = resolve(&set, "hello world");

        let ids: Vec<_> = matches.iter().map(|m| m.pattern).collect();
        assert_eq!(ids, vec![PatternId::new(0), PatternId::new(1)]);
    }

    #[test]
    fn resolve_extracts_first_match_span() {
        let set = pattern_set(&[r#"".*?""#]);
        let text = r#"xhr.open(GET, "data.txt", true); var b = "other";"#;

        let matches = resolve(&set, text);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched, "\"data.txt\"");
        assert_eq!(&text[matches[0].range()], "\"data.txt\"");
    }

    #[test]
    fn resolve_matches_case_insensitively_across_lines() {
        let set = pattern_set(&["<script>.*</script>"]);
        let matches = resolve(&set, "<SCRIPT>\nalert(1)\n</Script>");
        assert_eq!(matches.len(), 1);
    }
}
