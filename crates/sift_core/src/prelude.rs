//! Convenience re-exports of the most commonly used types.

pub use crate::config::{Config, ConfigError, PatternConfig};
pub use crate::engine::Engine;
pub use crate::error::ConfigurationError;
pub use crate::finding::{EvidenceId, Finding, FindingSnapshot, SourceLocation};
pub use crate::pattern::{Pattern, PatternId, PatternSet};
pub use crate::sink::{CollectingNotifier, FindingSink, MemorySink, Notifier, NullNotifier, NullSink};
#[cfg(feature = "tracing")]
pub use crate::sink::TracingNotifier;
