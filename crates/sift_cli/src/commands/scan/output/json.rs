//! JSON output formatter for scan findings.

use std::io::Write;

use sift_core::prelude::*;

/// Serialises findings as a pretty-printed JSON array to the given writer.
pub fn write(findings: &[FindingSnapshot], writer: &mut dyn Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, findings)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_snapshots_as_array() {
        let finding = FindingSnapshot {
            pattern_source: "k.y".into(),
            name: "User defined regex - k.y".into(),
            description: "The response matches".into(),
            source_location: "src/app.js".into(),
            evidence_ids: vec![EvidenceId::new(3), EvidenceId::new(1)],
        };
        let mut out = Vec::new();

        write(&[finding], &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["pattern_source"], "k.y");
        assert_eq!(value[0]["source_location"], "src/app.js");
        assert_eq!(value[0]["evidence_ids"], serde_json::json!([3, 1]));
    }

    #[test]
    fn writes_empty_array_without_findings() {
        let mut out = Vec::new();
        write(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
