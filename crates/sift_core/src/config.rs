use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Option values the operator uses as "unset" in place of an empty field.
const UNSET_MARKER: &str = "None";

/// Which pattern sources to compile.
///
/// Validated entirely inside `Engine::configure`. An empty or `"None"`
/// inline pattern is absent; any other string, whitespace included, is a
/// regex. A blank or `"None"` file path is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// A single regular expression supplied inline.
    #[serde(default)]
    pub inline: Option<String>,

    /// Path to a file with one regular expression per line.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl PatternConfig {
    /// Creates a configuration from optional inline and file sources.
    #[must_use]
    pub fn new(inline: Option<&str>, file: Option<&Path>) -> Self {
        Self {
            inline: inline.map(str::to_string),
            file: file.map(Path::to_path_buf),
        }
    }

    /// Returns the inline source, or `None` if it is unset.
    #[must_use]
    pub fn inline_source(&self) -> Option<&str> {
        self.inline
            .as_deref()
            .filter(|s| !s.is_empty() && *s != UNSET_MARKER)
    }

    /// Returns the pattern file path, or `None` if it is unset.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|p| p.to_str().is_none_or(is_set_path))
    }

    /// Returns `true` if neither source is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inline_source().is_none() && self.file_path().is_none()
    }

    /// Resolves a relative pattern file path against `base`.
    #[must_use]
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if let Some(file) = self.file_path()
            && file.is_relative()
        {
            self.file = Some(base.join(file));
        }
        self
    }
}

fn is_set_path(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != UNSET_MARKER
}

/// Settings loaded from `.sift.toml`.
///
/// All fields are optional; a missing file yields the defaults (no
/// patterns, no exclusions, no size limit).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Pattern sources to compile.
    #[serde(default)]
    pub patterns: PatternConfig,

    /// Glob patterns for file paths to exclude from scanning.
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Maximum file size in bytes. Larger files are skipped.
    #[serde(default)]
    pub max_file_size: Option<u64>,
}

impl Config {
    /// Creates a default configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a `.sift.toml` file.
    ///
    /// Returns the default configuration if the file does not exist. A
    /// relative `patterns.file` is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.patterns = config.patterns.resolved_against(base);

        Ok(config)
    }

    /// Parses settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }
}

/// Errors that can occur when reading or parsing a `.sift.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn pattern_config_default_is_empty() {
        let config = PatternConfig::default();
        assert!(config.is_empty());
        assert!(config.inline_source().is_none());
        assert!(config.file_path().is_none());
    }

    #[test]
    fn pattern_config_treats_empty_inline_as_unset() {
        assert!(PatternConfig::new(Some(""), None).inline_source().is_none());
    }

    #[test]
    fn pattern_config_keeps_whitespace_inline_pattern() {
        let config = PatternConfig::new(Some(" "), None);
        assert_eq!(config.inline_source(), Some(" "));
        assert!(!config.is_empty());
    }

    #[test]
    fn pattern_config_treats_blank_file_path_as_unset() {
        assert!(PatternConfig::new(None, Some(Path::new("  "))).file_path().is_none());
    }

    #[test]
    fn pattern_config_treats_none_marker_as_unset() {
        let config = PatternConfig::new(Some("None"), Some(Path::new("None")));
        assert!(config.is_empty());
    }

    #[test]
    fn pattern_config_keeps_inline_source_verbatim() {
        let config = PatternConfig::new(Some(" a b "), None);
        assert_eq!(config.inline_source(), Some(" a b "));
    }

    #[test]
    fn resolved_against_joins_relative_paths_only() {
        let relative = PatternConfig::new(None, Some(Path::new("regexes.txt"))).resolved_against(Path::new("/etc/sift"));
        assert_eq!(relative.file_path(), Some(Path::new("/etc/sift/regexes.txt")));

        let absolute = PatternConfig::new(None, Some(Path::new("/opt/regexes.txt"))).resolved_against(Path::new("/etc"));
        assert_eq!(absolute.file_path(), Some(Path::new("/opt/regexes.txt")));
    }

    #[test]
    fn from_toml_returns_defaults_for_empty_string() {
        let config = Config::from_toml("").unwrap();
        assert!(config.patterns.is_empty());
        assert!(config.exclude_paths.is_empty());
        assert!(config.max_file_size.is_none());
    }

    #[test]
    fn from_toml_parses_complete_config() {
        let toml = r#"
            exclude_paths = ["node_modules/**"]
            max_file_size = 1048576

            [patterns]
            inline = '".*?"'
            file = "regexes.txt"
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.patterns.inline_source(), Some(r#"".*?""#));
        assert_eq!(config.patterns.file_path(), Some(Path::new("regexes.txt")));
        assert_eq!(config.exclude_paths, vec!["node_modules/**"]);
        assert_eq!(config.max_file_size, Some(1_048_576));
    }

    #[test]
    fn from_toml_rejects_malformed_toml_syntax() {
        let err = Config::from_toml("this is { not valid toml").unwrap_err();
        assert_eq!(err.path(), Path::new("<inline>"));
    }

    #[test]
    fn load_returns_default_for_missing_file() {
        let config = Config::load(Path::new("/nonexistent/.sift.toml")).unwrap();
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn load_resolves_pattern_file_against_config_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".sift.toml");
        std::fs::write(&path, "[patterns]\nfile = \"regexes.txt\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.patterns.file_path(), Some(dir.path().join("regexes.txt").as_path()));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"max_file_size = \"big\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), file.path());
    }
}
