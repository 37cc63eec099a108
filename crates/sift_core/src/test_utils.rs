//! Test utilities for `sift_core` (compiled only during testing).

use crate::pattern::{Pattern, PatternId, PatternSet};

pub fn make_pattern(index: usize, source: &str) -> Pattern {
    Pattern::compile(PatternId::new(index), source).unwrap()
}

pub fn pattern_set(sources: &[&str]) -> PatternSet {
    let patterns = sources
        .iter()
        .enumerate()
        .map(|(idx, src)| make_pattern(idx, src))
        .collect();
    PatternSet::new(patterns).unwrap().unwrap()
}
