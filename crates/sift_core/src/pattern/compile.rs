//! Pattern compilation from inline and file sources.

use std::io;
use std::path::Path;

use regex::{Regex, RegexBuilder};
#[cfg(feature = "tracing")]
use tracing::debug;

use super::composite::alternation_source;
use super::{Pattern, PatternId, PatternSet};
use crate::config::PatternConfig;
use crate::error::ConfigurationError;

const COMMENT_PREFIX: char = '#';

/// A pattern source read from a file, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    /// Line the source was read from.
    pub line: usize,
    /// Trimmed regex source.
    pub source: String,
}

/// Compiles `source` case-insensitively with `.` matching newlines.
pub fn build_regex(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

/// Reads newline-delimited pattern sources from `path`.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
pub fn read_pattern_file(path: &Path) -> Result<Vec<FileSource>, ConfigurationError> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigurationError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigurationError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    Ok(parse_pattern_lines(&content))
}

fn parse_pattern_lines(content: &str) -> Vec<FileSource> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let source = raw.trim();
            if source.is_empty() || source.starts_with(COMMENT_PREFIX) {
                return None;
            }
            Some(FileSource {
                line: idx + 1,
                source: source.to_string(),
            })
        })
        .collect()
}

/// Compiles every source named by `config` into a [`PatternSet`].
///
/// File sources come first, in file order; the inline pattern is appended
/// last. Nothing is returned until every source and the composite have
/// compiled, so a failure never yields a partial set. `Ok(None)` means the
/// configuration names no patterns.
pub fn compile_pattern_set(config: &PatternConfig) -> Result<Option<PatternSet>, ConfigurationError> {
    let mut patterns = Vec::new();

    if let Some(path) = config.file_path() {
        for FileSource { line, source } in read_pattern_file(path)? {
            let id = PatternId::new(patterns.len());
            let pattern = Pattern::compile(id, &source).map_err(|err| ConfigurationError::InvalidPattern {
                pattern: source.clone(),
                line: Some(line),
                source: err,
            })?;
            patterns.push(pattern);
        }
    }

    if let Some(source) = config.inline_source() {
        let id = PatternId::new(patterns.len());
        let pattern = Pattern::compile(id, source).map_err(|err| ConfigurationError::InvalidPattern {
            pattern: source.to_string(),
            line: None,
            source: err,
        })?;
        patterns.push(pattern);
    }

    #[cfg(feature = "tracing")]
    debug!(patterns = patterns.len(), "compiled pattern sources");

    let combined = alternation_source(patterns.iter().map(Pattern::source));
    PatternSet::new(patterns).map_err(|err| ConfigurationError::InvalidPattern {
        pattern: combined,
        line: None,
        source: err,
    })
}
