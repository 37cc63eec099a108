//! Composite matcher used as a pre-filter.

use regex::Regex;

use super::{Pattern, build_regex};

/// Alternation of every pattern source, `(src1)|(src2)|...`.
///
/// Only answers "does anything match?". Which pattern matched is always
/// decided by the individual regexes.
#[derive(Debug, Clone)]
pub struct CompositeMatcher {
    regex: Regex,
}

impl CompositeMatcher {
    /// Builds the alternation over `patterns` in registration order.
    ///
    /// Returns `Ok(None)` when there is nothing to combine.
    pub fn build(patterns: &[Pattern]) -> Result<Option<Self>, regex::Error> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let source = alternation_source(patterns.iter().map(Pattern::source));
        let regex = build_regex(&source)?;

        Ok(Some(Self { regex }))
    }

    /// Returns `true` if at least one source matches somewhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the combined source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Joins sources into `(a)|(b)|(c)`.
pub(crate) fn alternation_source<'a>(sources: impl IntoIterator<Item = &'a str>) -> String {
    let mut combined = String::new();

    for (idx, source) in sources.into_iter().enumerate() {
        if idx > 0 {
            combined.push('|');
        }
        combined.push('(');
        combined.push_str(source);
        combined.push(')');
    }

    combined
}
