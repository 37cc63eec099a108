use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while compiling a pattern configuration.
///
/// Every variant is fatal to the `configure()` call that produced it and
/// leaves the engine's previously active configuration untouched.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The pattern file does not exist.
    #[error("pattern file not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The pattern file exists but could not be read as UTF-8 text.
    #[error("failed to read pattern file '{path}': {source}")]
    FileUnreadable {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A pattern source, or the combined alternation of all sources, failed
    /// to compile.
    #[error("{}", describe_invalid(.pattern, .line))]
    InvalidPattern {
        /// The offending regular expression source.
        pattern: String,
        /// 1-based line in the pattern file, when the source came from one.
        line: Option<usize>,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

impl ConfigurationError {
    /// Returns the offending pattern source for `InvalidPattern` errors.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::InvalidPattern { pattern, .. } => Some(pattern),
            Self::FileNotFound { .. } | Self::FileUnreadable { .. } => None,
        }
    }
}

fn describe_invalid(pattern: &str, line: &Option<usize>) -> String {
    match line {
        Some(line) => format!("invalid regex on line {line} of pattern file: {pattern}"),
        None => format!("invalid regex: {pattern}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_error(src: &str) -> regex::Error {
        regex::Regex::new(src).unwrap_err()
    }

    #[test]
    fn invalid_pattern_message_includes_source() {
        let err = ConfigurationError::InvalidPattern {
            pattern: "(unterminated".into(),
            line: None,
            source: regex_error("(unterminated"),
        };
        assert_eq!(err.to_string(), "invalid regex: (unterminated");
        assert_eq!(err.pattern(), Some("(unterminated"));
    }

    #[test]
    fn invalid_pattern_message_includes_file_line() {
        let err = ConfigurationError::InvalidPattern {
            pattern: "[a-".into(),
            line: Some(3),
            source: regex_error("[a-"),
        };
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn file_errors_have_no_pattern() {
        let err = ConfigurationError::FileNotFound {
            path: PathBuf::from("missing.txt"),
        };
        assert!(err.pattern().is_none());
        assert!(err.to_string().contains("missing.txt"));
    }
}
