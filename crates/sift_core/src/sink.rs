//! Destinations for findings and creation notices.
//!
//! The engine never owns persistence or user output. It pushes a
//! [`FindingSnapshot`] to a [`FindingSink`] each time a finding is created
//! or extended, and sends one message to a [`Notifier`] per created finding.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "tracing")]
use tracing::info;

use crate::finding::FindingSnapshot;

/// Receives finding snapshots, keyed by pattern source.
///
/// Implementations must treat `store` as an idempotent overwrite of the
/// entry with the same `pattern_source`.
pub trait FindingSink: Send + Sync {
    /// Stores or replaces the snapshot for `finding.pattern_source`.
    fn store(&self, finding: &FindingSnapshot);

    /// Drops every stored entry. The engine never calls this; callers use
    /// it to discard findings from a previous configuration.
    fn reset(&self) {}
}

/// Receives one human-readable message per newly created finding.
pub trait Notifier: Send + Sync {
    /// Delivers `message`.
    fn notify(&self, message: &str);
}

/// Thread-safe in-memory sink preserving first-store order.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<FindingSnapshot>>,
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("entries", &self.lock().len())
            .finish()
    }
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every stored snapshot.
    #[must_use]
    pub fn findings(&self) -> Vec<FindingSnapshot> {
        self.lock().clone()
    }

    /// Returns the snapshot stored for `pattern_source`, if any.
    #[must_use]
    pub fn get(&self, pattern_source: &str) -> Option<FindingSnapshot> {
        self.lock()
            .iter()
            .find(|entry| entry.pattern_source == pattern_source)
            .cloned()
    }

    /// Returns the number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes every stored snapshot.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FindingSnapshot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FindingSink for MemorySink {
    fn store(&self, finding: &FindingSnapshot) {
        let mut entries = self.lock();
        match entries
            .iter_mut()
            .find(|entry| entry.pattern_source == finding.pattern_source)
        {
            Some(existing) => existing.clone_from(finding),
            None => entries.push(finding.clone()),
        }
    }

    fn reset(&self) {
        self.clear();
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FindingSink for NullSink {
    fn store(&self, _finding: &FindingSnapshot) {}
}

/// Notifier that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}
}

/// Notifier that keeps every message in memory.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Notifier that logs each message at info level.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[cfg(feature = "tracing")]
impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!("{message}");
    }
}
