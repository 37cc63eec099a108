//! Core match engine for sift.
//!
//! This crate classifies text against a set of operator-supplied regular
//! expressions and folds repeated matches of each expression into a single
//! finding with a growing list of evidence ids. It is designed to sit
//! behind many concurrent workers that feed it already-fetched text.
//!
//! # Main Types
//!
//! - [`Engine`] - Owns the pattern configuration and aggregates findings
//! - [`PatternSet`] - Ordered patterns plus their composite pre-filter
//! - [`Finding`] - The deduplicated record for one pattern
//! - [`FindingSink`] / [`Notifier`] - Injected destinations for results
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors that library
//! consumers can match on:
//!
//! - [`ConfigurationError`] - Pattern file and regex compilation failures
//! - [`ConfigError`] - Settings file loading/parsing failures
//!
//! The CLI crate (`sift_cli`) uses `anyhow` for error propagation.

/// Create-or-extend aggregation of findings per pattern.
pub mod aggregator;
/// Settings loaded from `.sift.toml` and the typed pattern configuration.
pub mod config;
/// The engine tying compilation, matching, and aggregation together.
pub mod engine;
/// Error types for pattern compilation and settings loading.
pub mod error;
/// Findings, evidence ids, and source locations.
pub mod finding;
/// Pattern compilation and the composite pre-filter.
pub mod pattern;
/// Common re-exports for internal use.
pub mod prelude;
/// Per-pattern match resolution.
pub mod resolver;
/// Finding sinks and notifiers.
pub mod sink;
#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{Config, ConfigError, PatternConfig};
pub use engine::Engine;
pub use error::ConfigurationError;
pub use finding::{EvidenceId, Finding, FindingSnapshot, SourceLocation};
pub use pattern::{CompositeMatcher, Pattern, PatternId, PatternSet};
pub use sink::{CollectingNotifier, FindingSink, MemorySink, Notifier, NullNotifier, NullSink};

/// Default filename for sift configuration.
pub const CONFIG_FILENAME: &str = ".sift.toml";
