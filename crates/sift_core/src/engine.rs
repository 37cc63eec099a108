//! The match engine: configuration lifecycle and inspection.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::aggregator::FindingTable;
use crate::config::PatternConfig;
use crate::error::ConfigurationError;
use crate::finding::{EvidenceId, FindingSnapshot, SourceLocation};
use crate::pattern::{PatternId, PatternSet, compile_pattern_set};
use crate::resolver::resolve;
use crate::sink::{FindingSink, Notifier};

/// One configuration's patterns and the findings attributed to them.
#[derive(Debug)]
struct Epoch {
    patterns: PatternSet,
    findings: FindingTable,
}

impl Epoch {
    fn new(patterns: PatternSet) -> Self {
        let findings = FindingTable::new(patterns.len());
        Self { patterns, findings }
    }
}

/// Multi-pattern match engine with deduplicated finding aggregation.
///
/// The engine is either unconfigured, where [`Engine::inspect`] does
/// nothing, or configured with a non-empty pattern set. It is `Send + Sync`;
/// share it behind an `Arc` and call `inspect` from as many workers as
/// needed.
pub struct Engine {
    epoch: RwLock<Option<Arc<Epoch>>>,
    sink: Arc<dyn FindingSink>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("patterns", &self.pattern_count())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an unconfigured engine that reports to `sink` and `notifier`.
    #[must_use]
    pub fn new(sink: Arc<dyn FindingSink>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            epoch: RwLock::new(None),
            sink,
            notifier,
        }
    }

    /// Compiles `config` and installs it, replacing the previous state.
    ///
    /// On success the new patterns, composite matcher, and an empty finding
    /// map replace the old ones as a unit. On failure nothing changes. An
    /// empty configuration leaves the engine unconfigured. The sink is not
    /// touched; call [`FindingSink::reset`] to drop stale entries.
    pub fn configure(&self, config: &PatternConfig) -> Result<(), ConfigurationError> {
        let epoch = compile_pattern_set(config)?.map(|patterns| Arc::new(Epoch::new(patterns)));

        #[cfg(feature = "tracing")]
        debug!(
            patterns = epoch.as_ref().map_or(0, |e| e.patterns.len()),
            "installing pattern configuration"
        );

        *self.epoch.write().unwrap_or_else(PoisonError::into_inner) = epoch;
        Ok(())
    }

    /// Inspects `text` and aggregates a finding for every matching pattern.
    ///
    /// Returns the ids of the patterns that matched, in registration order.
    /// The result is empty when the engine is unconfigured or no pattern
    /// matches. `text` must already be known to be textual content.
    pub fn inspect(&self, text: &str, evidence_id: EvidenceId, source_location: &SourceLocation) -> Vec<PatternId> {
        let Some(epoch) = self.current() else {
            return Vec::new();
        };

        if !epoch.patterns.pre_test(text) {
            #[cfg(feature = "tracing")]
            trace!(evidence = %evidence_id, "no pattern matched");
            return Vec::new();
        }

        let matches = resolve(&epoch.patterns, text);
        let mut matched = Vec::with_capacity(matches.len());

        for mat in matches {
            let Some(pattern) = epoch.patterns.get(mat.pattern) else {
                continue;
            };

            epoch.findings.aggregate(
                pattern,
                mat.matched,
                evidence_id,
                source_location,
                self.sink.as_ref(),
                self.notifier.as_ref(),
            );
            matched.push(mat.pattern);
        }

        matched
    }

    /// Returns `true` if any configured pattern matches somewhere in `text`.
    #[must_use]
    pub fn pre_test(&self, text: &str) -> bool {
        self.current().is_some_and(|epoch| epoch.patterns.pre_test(text))
    }

    /// Returns `true` if a non-empty pattern set is installed.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.current().is_some()
    }

    /// Returns the number of installed patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.current().map_or(0, |epoch| epoch.patterns.len())
    }

    /// Returns the installed pattern sources in registration order.
    #[must_use]
    pub fn pattern_sources(&self) -> Vec<Arc<str>> {
        self.current()
            .map(|epoch| {
                epoch
                    .patterns
                    .patterns()
                    .iter()
                    .map(|p| Arc::clone(&p.source))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns snapshots of the current configuration's findings in
    /// registration order.
    #[must_use]
    pub fn findings(&self) -> Vec<FindingSnapshot> {
        self.current()
            .map(|epoch| epoch.findings.snapshots())
            .unwrap_or_default()
    }

    fn current(&self) -> Option<Arc<Epoch>> {
        self.epoch.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
