//! Create-or-extend aggregation of findings under mutual exclusion.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::finding::{EvidenceId, Finding, FindingSnapshot, SourceLocation, creation_message};
use crate::pattern::Pattern;
use crate::sink::{FindingSink, Notifier};

/// What an aggregation step did to a pattern's finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// The pattern had no finding; one was created.
    Created,
    /// The pattern's existing finding gained an evidence id.
    Extended,
}

/// One optional finding slot per pattern, guarded by a single mutex.
pub struct FindingTable {
    slots: Mutex<Vec<Option<Finding>>>,
}

impl fmt::Debug for FindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.lock();
        f.debug_struct("FindingTable")
            .field("patterns", &slots.len())
            .field("findings", &slots.iter().flatten().count())
            .finish()
    }
}

impl FindingTable {
    /// Creates a table with an empty slot for each of `pattern_count` patterns.
    #[must_use]
    pub fn new(pattern_count: usize) -> Self {
        Self {
            slots: Mutex::new(vec![None; pattern_count]),
        }
    }

    /// Creates or extends the finding for `pattern` and forwards it.
    ///
    /// The existence check, the update, the sink push, and the creation
    /// notice all happen under the table lock, so two concurrent first
    /// matches of one pattern yield one finding holding both evidence ids.
    ///
    /// Returns `None` if `pattern` lies outside the table.
    pub fn aggregate(
        &self,
        pattern: &Pattern,
        matched: &str,
        evidence_id: EvidenceId,
        source_location: &SourceLocation,
        sink: &dyn FindingSink,
        notifier: &dyn Notifier,
    ) -> Option<Aggregation> {
        let mut slots = self.lock();
        let slot = slots.get_mut(pattern.id.index())?;

        if let Some(finding) = slot.as_mut() {
            finding.record(evidence_id);
            sink.store(&finding.snapshot());

            #[cfg(feature = "tracing")]
            trace!(pattern = %pattern.id, evidence = %evidence_id, "finding extended");

            return Some(Aggregation::Extended);
        }

        let finding = slot.insert(Finding::new(pattern, matched, evidence_id, source_location.clone()));
        sink.store(&finding.snapshot());
        notifier.notify(&creation_message(&pattern.source, matched));

        #[cfg(feature = "tracing")]
        trace!(pattern = %pattern.id, evidence = %evidence_id, "finding created");

        Some(Aggregation::Created)
    }

    /// Returns snapshots of every existing finding in registration order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<FindingSnapshot> {
        self.lock().iter().flatten().map(Finding::snapshot).collect()
    }

    /// Returns the number of patterns that have a finding.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.lock().iter().flatten().count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Option<Finding>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{CollectingNotifier, MemorySink};
    use crate::test_utils::make_pattern;

    fn location() -> SourceLocation {
        SourceLocation::from("http://example.com/")
    }

    #[test]
    fn new_table_has_no_findings() {
        let table = FindingTable::new(3);
        assert_eq!(table.finding_count(), 0);
        assert!(table.snapshots().is_empty());
    }

    #[test]
    fn first_match_creates_and_notifies_once() {
        let table = FindingTable::new(1);
        let pattern = make_pattern(0, "hello");
        let sink = MemorySink::new();
        let notifier = CollectingNotifier::new();

        let first = table.aggregate(&pattern, "hello", EvidenceId::new(1), &location(), &sink, &notifier);
        let second = table.aggregate(&pattern, "HELLO", EvidenceId::new(2), &location(), &sink, &notifier);

        assert_eq!(first, Some(Aggregation::Created));
        assert_eq!(second, Some(Aggregation::Extended));
        assert_eq!(notifier.messages().len(), 1);
        assert_eq!(table.finding_count(), 1);
    }

    #[test]
    fn extension_keeps_first_description_and_location() {
        let table = FindingTable::new(1);
        let pattern = make_pattern(0, "h.llo");
        let sink = MemorySink::new();
        let notifier = CollectingNotifier::new();

        table.aggregate(&pattern, "hello", EvidenceId::new(1), &"first".into(), &sink, &notifier);
        table.aggregate(&pattern, "hallo", EvidenceId::new(2), &"second".into(), &sink, &notifier);

        let snapshot = &table.snapshots()[0];
        assert!(snapshot.description.contains("hello"));
        assert!(!snapshot.description.contains("hallo"));
        assert_eq!(snapshot.source_location.as_str(), "first");
    }

    #[test]
    fn every_step_pushes_latest_snapshot_to_sink() {
        let table = FindingTable::new(1);
        let pattern = make_pattern(0, "x");
        let sink = MemorySink::new();
        let notifier = CollectingNotifier::new();

        for id in 1..=3 {
            table.aggregate(&pattern, "x", EvidenceId::new(id), &location(), &sink, &notifier);
        }

        let stored = sink.get("x").unwrap();
        assert_eq!(
            stored.evidence_ids,
            vec![EvidenceId::new(1), EvidenceId::new(2), EvidenceId::new(3)]
        );
    }

    #[test]
    fn snapshots_follow_registration_order() {
        let table = FindingTable::new(2);
        let first = make_pattern(0, "a");
        let second = make_pattern(1, "b");
        let sink = MemorySink::new();
        let notifier = CollectingNotifier::new();

        table.aggregate(&second, "b", EvidenceId::new(1), &location(), &sink, &notifier);
        table.aggregate(&first, "a", EvidenceId::new(2), &location(), &sink, &notifier);

        let sources: Vec<_> = table.snapshots().into_iter().map(|s| s.pattern_source).collect();
        assert_eq!(sources, vec!["a", "b"]);
    }

    #[test]
    fn pattern_outside_table_is_ignored() {
        let table = FindingTable::new(1);
        let stray = make_pattern(5, "x");
        let sink = MemorySink::new();
        let notifier = CollectingNotifier::new();

        let outcome = table.aggregate(&stray, "x", EvidenceId::new(1), &location(), &sink, &notifier);

        assert!(outcome.is_none());
        assert!(sink.is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn debug_impl_shows_counts() {
        let table = FindingTable::new(2);
        let debug = format!("{table:?}");
        assert!(debug.contains("patterns: 2"));
        assert!(debug.contains("findings: 0"));
    }
}
