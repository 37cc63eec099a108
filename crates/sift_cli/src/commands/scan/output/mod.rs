//! Output formatting for scan results.

mod json;
mod text;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use sift_core::prelude::*;

use crate::{OutputFormat, ScanArgs};

/// Aggregate statistics for a completed scan.
#[derive(Debug)]
pub struct ScanStats {
    /// Number of files collected.
    pub file_count: usize,
    /// Files read and inspected.
    pub inspected: usize,
    /// Files skipped before inspection.
    pub skipped: usize,
    /// Number of compiled patterns.
    pub pattern_count: usize,
    /// Wall-clock time for the entire scan.
    pub elapsed: Duration,
}

/// Everything needed to render scan output in any format.
#[derive(Debug)]
pub struct OutputContext<'a> {
    /// Findings in pattern registration order.
    pub findings: &'a [FindingSnapshot],
    /// Scanned files, indexed by evidence id.
    pub files: &'a [PathBuf],
    /// Creation notices, one per finding.
    pub notices: &'a [String],
    /// Scan statistics for the summary line.
    pub stats: ScanStats,
}

impl OutputContext<'_> {
    /// Returns the distinct files behind a finding's evidence, in scan order.
    #[must_use]
    pub fn evidence_paths(&self, finding: &FindingSnapshot) -> Vec<&Path> {
        let mut indices: Vec<usize> = finding
            .evidence_ids
            .iter()
            .filter_map(|id| usize::try_from(id.get()).ok())
            .collect();
        indices.sort_unstable();
        indices.dedup();

        indices
            .into_iter()
            .filter_map(|idx| self.files.get(idx).map(PathBuf::as_path))
            .collect()
    }
}

/// Writes scan output to a file or stdout in the requested format.
pub fn write_output(args: &ScanArgs, ctx: &OutputContext) -> anyhow::Result<()> {
    match &args.output {
        Some(path) => write_to_file(path, args.format, ctx),
        None => write_to_stdout(args.format, args.verbose, ctx),
    }
}

fn write_to_file(path: &PathBuf, format: OutputFormat, ctx: &OutputContext) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Text => text::write(ctx, &mut writer, true, 0),
        OutputFormat::Json => json::write(ctx.findings, &mut writer),
    }
}

fn write_to_stdout(format: OutputFormat, verbose: u8, ctx: &OutputContext) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();

    match format {
        OutputFormat::Text => text::write(ctx, &mut stdout, false, verbose),
        OutputFormat::Json => json::write(ctx.findings, &mut stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evidence_paths_are_distinct_and_ordered() {
        let files = vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")];
        let finding = FindingSnapshot {
            pattern_source: "x".into(),
            name: "User defined regex - x".into(),
            description: "d".into(),
            source_location: "c".into(),
            evidence_ids: [2, 0, 2, 9].into_iter().map(EvidenceId::new).collect(),
        };
        let ctx = OutputContext {
            findings: std::slice::from_ref(&finding),
            files: &files,
            notices: &[],
            stats: ScanStats {
                file_count: 3,
                inspected: 3,
                skipped: 0,
                pattern_count: 1,
                elapsed: Duration::ZERO,
            },
        };

        assert_eq!(ctx.evidence_paths(&finding), vec![Path::new("a"), Path::new("c")]);
    }
}
