//! Compiled patterns and the ordered pattern set.

mod compile;
mod composite;

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use compile::{FileSource, build_regex, compile_pattern_set, read_pattern_file};
pub use composite::CompositeMatcher;

/// Identifier of a pattern: its zero-based registration order.
///
/// File-sourced patterns are registered first, in file order, followed by
/// the inline pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(usize);

impl PatternId {
    /// Creates an identifier from a registration index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the registration index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single compiled signature.
///
/// Immutable once compiled. The regex is case-insensitive and lets `.`
/// match newlines.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Registration order within the owning [`PatternSet`].
    pub id: PatternId,
    /// The raw source the operator supplied.
    pub source: Arc<str>,
    /// Compiled matcher for `source`.
    pub regex: Regex,
}

impl Pattern {
    /// Compiles `source` as the pattern registered at `id`.
    pub fn compile(id: PatternId, source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            id,
            source: Arc::from(source),
            regex: build_regex(source)?,
        })
    }

    /// Returns the raw source as a string slice.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Ordered, non-empty collection of patterns plus their composite matcher.
///
/// A `PatternSet` only exists for a configured engine; an empty
/// configuration yields no set at all.
pub struct PatternSet {
    patterns: Vec<Pattern>,
    composite: CompositeMatcher,
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSet")
            .field("patterns", &self.patterns.len())
            .finish_non_exhaustive()
    }
}

impl PatternSet {
    /// Builds a set from already-compiled patterns.
    ///
    /// Returns `Ok(None)` for an empty list. Fails with the composite's
    /// compile error when the alternation of all sources is rejected.
    pub fn new(patterns: Vec<Pattern>) -> Result<Option<Self>, regex::Error> {
        let Some(composite) = CompositeMatcher::build(&patterns)? else {
            return Ok(None);
        };
        Ok(Some(Self { patterns, composite }))
    }

    /// Returns all patterns in registration order.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Looks up a pattern by identifier.
    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id.index())
    }

    /// Returns the number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the set holds no patterns. Sets built through
    /// [`PatternSet::new`] are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the composite matcher built over every source.
    #[must_use]
    pub const fn composite(&self) -> &CompositeMatcher {
        &self.composite
    }

    /// Returns `true` if any pattern matches somewhere in `text`.
    #[must_use]
    pub fn pre_test(&self, text: &str) -> bool {
        self.composite.is_match(text)
    }
}
